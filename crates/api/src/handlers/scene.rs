//! Handlers for the `/scenes` resource.
//!
//! Scenes own sections and items the same way actors do.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::Json;
use voxcat_core::error::CoreError;
use voxcat_core::history::{
    create_message, delete_message, duplicates_warning, update_message, EntityKind,
};
use voxcat_core::types::EntityId;
use voxcat_db::cascade::CascadePlan;
use voxcat_db::models::owner::OwnerRef;
use voxcat_db::models::scene::{CreateScenes, Scene, UpdateScene};
use voxcat_db::repositories::{CatalogRepo, SceneRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::{diff_entities, partition_batch, record_snapshot};
use crate::middleware::project::ActiveProject;
use crate::response::{BatchCreated, DataResponse};

/// GET /api/v1/scenes
pub async fn list(ActiveProject(ctx): ActiveProject) -> AppResult<Json<DataResponse<Vec<Scene>>>> {
    let scenes = SceneRepo::list(&ctx).await?;
    Ok(Json(DataResponse { data: scenes }))
}

/// POST /api/v1/scenes
///
/// `name` may be a comma-separated list; every scene created gets the same
/// description and provider settings.
pub async fn create(
    ActiveProject(ctx): ActiveProject,
    Json(input): Json<CreateScenes>,
) -> AppResult<(StatusCode, Json<DataResponse<BatchCreated<Scene>>>)> {
    let before = CatalogRepo::read(&ctx).await;
    let partition = partition_batch(&input.name, before.scenes.iter().map(|s| s.name.as_str()))?;

    let scenes = partition
        .new
        .iter()
        .map(|name| {
            let scene = Scene::new(
                name.as_str(),
                input.description.clone(),
                input.provider_settings.clone(),
            );
            scene.check().map(|()| scene)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let message = create_message(EntityKind::Scene, &partition.new);
    record_snapshot(&ctx, &message, &before).await;
    SceneRepo::insert_many(&ctx, &scenes).await?;

    tracing::info!(
        project = ctx.name(),
        created = scenes.len(),
        skipped = partition.duplicates.len(),
        "Scenes created"
    );

    let warning = (!partition.duplicates.is_empty()).then(|| {
        duplicates_warning(EntityKind::Scene, scenes.len(), &partition.duplicates)
    });
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: BatchCreated {
                created: scenes,
                duplicates_skipped: partition.duplicates,
                warning,
            },
        }),
    ))
}

/// GET /api/v1/scenes/{id}
pub async fn get_by_id(
    ActiveProject(ctx): ActiveProject,
    Path(id): Path<EntityId>,
) -> AppResult<Json<DataResponse<Scene>>> {
    let scene = SceneRepo::find_by_id(&ctx, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Scene", id))?;
    Ok(Json(DataResponse { data: scene }))
}

/// PUT /api/v1/scenes/{id}
pub async fn update(
    ActiveProject(ctx): ActiveProject,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdateScene>,
) -> AppResult<Json<DataResponse<Scene>>> {
    let before = CatalogRepo::read(&ctx).await;
    let current = before
        .scene(id)
        .cloned()
        .ok_or_else(|| CoreError::not_found("Scene", id))?;
    let updated = current.apply(&input);
    updated.check()?;

    if before
        .scenes
        .iter()
        .any(|s| s.id != id && s.name.eq_ignore_ascii_case(&updated.name))
    {
        return Err(CoreError::DuplicateName {
            names: vec![updated.name],
        }
        .into());
    }

    let changes = diff_entities(&current, &updated)?;
    let rename = Some((current.name.as_str(), updated.name.as_str()));
    if let Some(message) = update_message(&current.name, rename, &changes) {
        record_snapshot(&ctx, &message, &before).await;
    }

    if !SceneRepo::update(&ctx, &updated).await? {
        return Err(AppError::Core(CoreError::not_found("Scene", id)));
    }
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/scenes/{id}
pub async fn delete(
    ActiveProject(ctx): ActiveProject,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    let before = CatalogRepo::read(&ctx).await;
    let scene = before
        .scene(id)
        .ok_or_else(|| CoreError::not_found("Scene", id))?;

    let plan = CascadePlan::for_owner(&before, OwnerRef::scene(id));
    let message = delete_message(EntityKind::Scene, &scene.name);
    record_snapshot(&ctx, &message, &before).await;

    let report = plan.commit(&ctx).await?;
    tracing::info!(
        project = ctx.name(),
        %id,
        sections = report.sections,
        items = report.items,
        takes = report.takes,
        "Scene deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}
