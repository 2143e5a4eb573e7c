//! Handlers for the `/snapshots` resource (undo/redo history).

use axum::http::StatusCode;
use axum::Json;
use voxcat_core::history::HistoryStatus;
use voxcat_db::history::{HistoryListing, HistoryStep, SnapshotManager};

use crate::error::AppResult;
use crate::middleware::project::ActiveProject;
use crate::response::DataResponse;

/// GET /api/v1/snapshots
///
/// Stack depths and the messages of the next undo and redo.
pub async fn status(ActiveProject(ctx): ActiveProject) -> Json<DataResponse<HistoryStatus>> {
    let status = SnapshotManager::refresh_state(&ctx).await;
    Json(DataResponse { data: status })
}

/// DELETE /api/v1/snapshots
///
/// Clears the undo stack. The redo stack is kept.
pub async fn clear(ActiveProject(ctx): ActiveProject) -> AppResult<StatusCode> {
    SnapshotManager::clear(&ctx).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/snapshots/history
pub async fn history(
    ActiveProject(ctx): ActiveProject,
) -> AppResult<Json<DataResponse<HistoryListing>>> {
    let listing = SnapshotManager::list(&ctx).await?;
    Ok(Json(DataResponse { data: listing }))
}

/// POST /api/v1/snapshots/undo
pub async fn undo(ActiveProject(ctx): ActiveProject) -> AppResult<Json<DataResponse<HistoryStep>>> {
    let step = SnapshotManager::undo(&ctx).await?;
    Ok(Json(DataResponse { data: step }))
}

/// POST /api/v1/snapshots/redo
pub async fn redo(ActiveProject(ctx): ActiveProject) -> AppResult<Json<DataResponse<HistoryStep>>> {
    let step = SnapshotManager::redo(&ctx).await?;
    Ok(Json(DataResponse { data: step }))
}
