//! Handler for the whole-catalog read.

use axum::Json;
use voxcat_db::models::catalog::Catalog;
use voxcat_db::repositories::CatalogRepo;

use crate::error::AppResult;
use crate::middleware::project::ActiveProject;
use crate::response::DataResponse;

/// GET /api/v1/catalog
///
/// Actors, sections, items and scenes in one response. Collections that
/// cannot be read come back empty.
pub async fn get_catalog(
    ActiveProject(ctx): ActiveProject,
) -> AppResult<Json<DataResponse<Catalog>>> {
    let catalog = CatalogRepo::read(&ctx).await;
    Ok(Json(DataResponse { data: catalog }))
}
