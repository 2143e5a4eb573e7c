//! Handler for re-inserting a deleted actor or scene.

use axum::http::StatusCode;
use axum::Json;
use voxcat_db::repositories::CatalogRepo;
use voxcat_db::restore::{RestoreBundle, RestoreReport};

use crate::error::AppResult;
use crate::middleware::project::ActiveProject;
use crate::response::DataResponse;

/// POST /api/v1/restore
///
/// Body: `{ "actor" | "scene": {...}, "sections": [...], "items": [...] }`.
/// Returns 409 if the owner still exists. Records whose ids are already
/// present are skipped. The undo and redo stacks are left untouched.
pub async fn restore(
    ActiveProject(ctx): ActiveProject,
    Json(bundle): Json<RestoreBundle>,
) -> AppResult<(StatusCode, Json<DataResponse<RestoreReport>>)> {
    let catalog = CatalogRepo::read(&ctx).await;
    let plan = bundle.plan(&catalog)?;
    let report = plan.commit(&ctx).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: report })))
}
