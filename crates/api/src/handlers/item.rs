//! Handlers for the `/items` resource (content items).
//!
//! An item belongs to an actor or scene and optionally to one of that
//! owner's sections. Its `cue_id` is unique per owner.

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use voxcat_core::error::CoreError;
use voxcat_core::history::{create_message, delete_message, update_message, EntityKind};
use voxcat_core::naming::item_filename;
use voxcat_core::types::EntityId;
use voxcat_db::cascade::CascadePlan;
use voxcat_db::models::catalog::Catalog;
use voxcat_db::models::item::{CreateItem, Item, UpdateItem};
use voxcat_db::repositories::{CatalogRepo, ItemFilter, ItemRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::{diff_entities, record_snapshot};
use crate::middleware::project::ActiveProject;
use crate::query::ItemParams;
use crate::response::DataResponse;

/// GET /api/v1/items?section_id=&owner_id=
pub async fn list(
    ActiveProject(ctx): ActiveProject,
    Query(params): Query<ItemParams>,
) -> AppResult<Json<DataResponse<Vec<Item>>>> {
    let filter = ItemFilter {
        owner_id: params.owner_id,
        section_id: params.section_id,
    };
    let items = ItemRepo::list_filtered(&ctx, filter).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/items
///
/// `filename` defaults to `{owner_base}_{cue_slug}`.
pub async fn create(
    ActiveProject(ctx): ActiveProject,
    Json(input): Json<CreateItem>,
) -> AppResult<(StatusCode, Json<DataResponse<Item>>)> {
    let before = CatalogRepo::read(&ctx).await;
    let owner = input.owner();
    before.check_item_placement(owner, input.section_id)?;

    let cue_id = input.cue_id.trim().to_string();
    reject_duplicate_cue(&before, &cue_id, owner.owner_id, None)?;

    let filename = match input.filename {
        Some(filename) => filename,
        None => {
            let base = before
                .owner_base_filename(owner)
                .ok_or_else(|| CoreError::not_found(owner.owner_type.entity(), owner.owner_id))?;
            item_filename(&base, &cue_id)
        }
    };

    let item = Item::new(owner, input.section_id, cue_id, input.prompt, filename);
    item.check()?;

    let message = create_message(EntityKind::Item, &[before.item_label(&item)]);
    record_snapshot(&ctx, &message, &before).await;
    ItemRepo::insert_many(&ctx, std::slice::from_ref(&item)).await?;

    tracing::info!(project = ctx.name(), id = %item.id, cue_id = %item.cue_id, "Item created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// GET /api/v1/items/{id}
pub async fn get_by_id(
    ActiveProject(ctx): ActiveProject,
    Path(id): Path<EntityId>,
) -> AppResult<Json<DataResponse<Item>>> {
    let item = ItemRepo::find_by_id(&ctx, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Item", id))?;
    Ok(Json(DataResponse { data: item }))
}

/// PUT /api/v1/items/{id}
///
/// Moving an item to another section is allowed only within its owner;
/// `"section_id": null` ungroups it.
pub async fn update(
    ActiveProject(ctx): ActiveProject,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdateItem>,
) -> AppResult<Json<DataResponse<Item>>> {
    let before = CatalogRepo::read(&ctx).await;
    let current = before
        .item(id)
        .cloned()
        .ok_or_else(|| CoreError::not_found("Item", id))?;

    let updated = current.apply(&input);
    before.check_item_placement(updated.owner(), updated.section_id)?;
    updated.check()?;
    if updated.cue_id != current.cue_id {
        reject_duplicate_cue(&before, &updated.cue_id, updated.owner_id, Some(id))?;
    }

    let changes = diff_entities(&current, &updated)?;
    let path = before.item_label(&current);
    if let Some(message) = update_message(
        &path,
        Some((current.cue_id.as_str(), updated.cue_id.as_str())),
        &changes,
    ) {
        record_snapshot(&ctx, &message, &before).await;
    }

    if !ItemRepo::update(&ctx, &updated).await? {
        return Err(AppError::Core(CoreError::not_found("Item", id)));
    }
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/items/{id}
///
/// Removes the item and its takes.
pub async fn delete(
    ActiveProject(ctx): ActiveProject,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    let before = CatalogRepo::read(&ctx).await;
    let item = before
        .item(id)
        .ok_or_else(|| CoreError::not_found("Item", id))?;

    let message = delete_message(EntityKind::Item, &before.item_label(item));
    record_snapshot(&ctx, &message, &before).await;

    let report = CascadePlan::for_item(id).commit(&ctx).await?;
    tracing::info!(project = ctx.name(), %id, takes = report.takes, "Item deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn reject_duplicate_cue(
    catalog: &Catalog,
    cue_id: &str,
    owner_id: EntityId,
    except: Option<EntityId>,
) -> AppResult<()> {
    let taken = catalog.items.iter().any(|i| {
        i.owner_id == owner_id && Some(i.id) != except && i.cue_id.eq_ignore_ascii_case(cue_id)
    });
    if taken {
        return Err(CoreError::DuplicateName {
            names: vec![cue_id.to_string()],
        }
        .into());
    }
    Ok(())
}
