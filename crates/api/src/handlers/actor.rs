//! Handlers for the `/actors` resource.
//!
//! Actors own sections and items. Deleting an actor cascades to everything
//! it owns (and to the takes of its items).

use axum::extract::Path;
use axum::http::StatusCode;
use axum::Json;
use voxcat_core::error::CoreError;
use voxcat_core::history::{
    create_message, delete_message, duplicates_warning, update_message, EntityKind,
};
use voxcat_core::naming::unique_base_filename;
use voxcat_core::types::EntityId;
use voxcat_db::cascade::CascadePlan;
use voxcat_db::models::actor::{Actor, CreateActors, UpdateActor};
use voxcat_db::models::owner::OwnerRef;
use voxcat_db::repositories::{ActorRepo, CatalogRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::{diff_entities, partition_batch, record_snapshot};
use crate::middleware::project::ActiveProject;
use crate::response::{BatchCreated, DataResponse};

/// GET /api/v1/actors
pub async fn list(ActiveProject(ctx): ActiveProject) -> AppResult<Json<DataResponse<Vec<Actor>>>> {
    let actors = ActorRepo::list(&ctx).await?;
    Ok(Json(DataResponse { data: actors }))
}

/// POST /api/v1/actors
///
/// `display_name` may be a comma-separated list. Names matching an existing
/// actor (case-insensitively) are skipped and reported; if every name is a
/// duplicate the request fails with `DUPLICATE_NAME`.
pub async fn create(
    ActiveProject(ctx): ActiveProject,
    Json(input): Json<CreateActors>,
) -> AppResult<(StatusCode, Json<DataResponse<BatchCreated<Actor>>>)> {
    let before = CatalogRepo::read(&ctx).await;
    let partition = partition_batch(
        &input.display_name,
        before.actors.iter().map(|a| a.display_name.as_str()),
    )?;

    let mut taken: Vec<String> = before.actors.iter().map(|a| a.base_filename.clone()).collect();
    let mut actors = Vec::with_capacity(partition.new.len());
    for name in &partition.new {
        let base = unique_base_filename(name, taken.iter().map(String::as_str));
        taken.push(base.clone());
        let actor = Actor::new(name.as_str(), base, input.provider_settings.clone());
        actor.check()?;
        actors.push(actor);
    }

    let message = create_message(EntityKind::Actor, &partition.new);
    record_snapshot(&ctx, &message, &before).await;
    ActorRepo::insert_many(&ctx, &actors).await?;

    tracing::info!(
        project = ctx.name(),
        created = actors.len(),
        skipped = partition.duplicates.len(),
        "Actors created"
    );

    let warning = (!partition.duplicates.is_empty()).then(|| {
        duplicates_warning(EntityKind::Actor, actors.len(), &partition.duplicates)
    });
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: BatchCreated {
                created: actors,
                duplicates_skipped: partition.duplicates,
                warning,
            },
        }),
    ))
}

/// GET /api/v1/actors/{id}
pub async fn get_by_id(
    ActiveProject(ctx): ActiveProject,
    Path(id): Path<EntityId>,
) -> AppResult<Json<DataResponse<Actor>>> {
    let actor = ActorRepo::find_by_id(&ctx, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Actor", id))?;
    Ok(Json(DataResponse { data: actor }))
}

/// PUT /api/v1/actors/{id}
///
/// The new display name must not match another actor's, ignoring case. A
/// rename keeps the existing `base_filename`; an explicit new
/// `base_filename` must not belong to another actor.
pub async fn update(
    ActiveProject(ctx): ActiveProject,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdateActor>,
) -> AppResult<Json<DataResponse<Actor>>> {
    let before = CatalogRepo::read(&ctx).await;
    let current = before
        .actor(id)
        .cloned()
        .ok_or_else(|| CoreError::not_found("Actor", id))?;
    let updated = current.apply(&input);
    updated.check()?;

    if before.actors.iter().any(|a| {
        a.id != id && a.display_name.eq_ignore_ascii_case(&updated.display_name)
    }) {
        return Err(CoreError::DuplicateName {
            names: vec![updated.display_name],
        }
        .into());
    }

    if updated.base_filename != current.base_filename
        && before
            .actors
            .iter()
            .any(|a| a.id != id && a.base_filename.eq_ignore_ascii_case(&updated.base_filename))
    {
        return Err(CoreError::Conflict(format!(
            "Base filename '{}' is already used by another actor",
            updated.base_filename
        ))
        .into());
    }

    let changes = diff_entities(&current, &updated)?;
    let message = update_message(
        &current.display_name,
        Some((current.display_name.as_str(), updated.display_name.as_str())),
        &changes,
    );
    if let Some(message) = &message {
        record_snapshot(&ctx, message, &before).await;
    }

    if !ActorRepo::update(&ctx, &updated).await? {
        return Err(AppError::Core(CoreError::not_found("Actor", id)));
    }
    tracing::debug!(project = ctx.name(), %id, changes = changes.len(), "Actor updated");
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/actors/{id}
///
/// Removes the actor, its sections, all of its items and their takes.
pub async fn delete(
    ActiveProject(ctx): ActiveProject,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    let before = CatalogRepo::read(&ctx).await;
    let actor = before
        .actor(id)
        .ok_or_else(|| CoreError::not_found("Actor", id))?;

    let plan = CascadePlan::for_owner(&before, OwnerRef::actor(id));
    let message = delete_message(EntityKind::Actor, &actor.display_name);
    record_snapshot(&ctx, &message, &before).await;

    let report = plan.commit(&ctx).await?;
    tracing::info!(
        project = ctx.name(),
        %id,
        sections = report.sections,
        items = report.items,
        takes = report.takes,
        "Actor deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}
