//! Handlers for takes.
//!
//! Takes are written directly: none of these handlers touch the undo
//! history. Every change re-derives the parent item's `all_approved` flag.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::Json;
use voxcat_core::error::CoreError;
use voxcat_core::naming::take_filename;
use voxcat_core::types::EntityId;
use voxcat_db::models::take::{all_approved, CreateTake, Take, UpdateTake};
use voxcat_db::repositories::{ItemRepo, TakeRepo};
use voxcat_db::{ProjectContext, StoreError};

use crate::error::{AppError, AppResult};
use crate::middleware::project::ActiveProject;
use crate::response::DataResponse;

/// GET /api/v1/items/{item_id}/takes
pub async fn list_by_item(
    ActiveProject(ctx): ActiveProject,
    Path(item_id): Path<EntityId>,
) -> AppResult<Json<DataResponse<Vec<Take>>>> {
    ItemRepo::find_by_id(&ctx, item_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Item", item_id))?;
    let takes = TakeRepo::list_by_item(&ctx, item_id).await?;
    Ok(Json(DataResponse { data: takes }))
}

/// POST /api/v1/items/{item_id}/takes
///
/// `filename` defaults to `{item_filename}_take_{n}.mp3`.
pub async fn create(
    ActiveProject(ctx): ActiveProject,
    Path(item_id): Path<EntityId>,
    Json(input): Json<CreateTake>,
) -> AppResult<(StatusCode, Json<DataResponse<Take>>)> {
    let item = ItemRepo::find_by_id(&ctx, item_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Item", item_id))?;
    let existing = TakeRepo::list_by_item(&ctx, item_id).await?;

    let filename = input
        .filename
        .unwrap_or_else(|| take_filename(&item.filename, existing.len() + 1));
    let take = Take::new(
        item_id,
        input.status.unwrap_or_default(),
        filename,
        input.generation_params.unwrap_or_else(|| serde_json::json!({})),
    );
    take.check()?;

    TakeRepo::create(&ctx, &take).await?;
    refresh_approval(&ctx, item_id).await?;

    tracing::info!(project = ctx.name(), %item_id, take_id = %take.id, "Take created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: take })))
}

/// PUT /api/v1/takes/{id}
pub async fn update(
    ActiveProject(ctx): ActiveProject,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdateTake>,
) -> AppResult<Json<DataResponse<Take>>> {
    let current = TakeRepo::find_by_id(&ctx, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Take", id))?;
    let updated = current.apply(&input);
    updated.check()?;

    if !TakeRepo::update(&ctx, &updated).await? {
        return Err(AppError::Core(CoreError::not_found("Take", id)));
    }
    refresh_approval(&ctx, updated.item_id).await?;

    tracing::debug!(project = ctx.name(), %id, status = ?updated.status, "Take updated");
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/takes/{id}
pub async fn delete(
    ActiveProject(ctx): ActiveProject,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    let removed = TakeRepo::delete(&ctx, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Take", id))?;
    refresh_approval(&ctx, removed.item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Recompute the item's `all_approved` flag from its takes, writing only
/// when it changed. A missing item is ignored.
async fn refresh_approval(ctx: &ProjectContext, item_id: EntityId) -> Result<(), StoreError> {
    let Some(mut item) = ItemRepo::find_by_id(ctx, item_id).await? else {
        return Ok(());
    };
    let takes = TakeRepo::list_by_item(ctx, item_id).await?;
    let approved = all_approved(&takes);
    if item.all_approved != approved {
        item.all_approved = approved;
        ItemRepo::update(ctx, &item).await?;
        tracing::debug!(project = ctx.name(), %item_id, approved, "Item approval changed");
    }
    Ok(())
}
