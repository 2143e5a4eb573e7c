//! Project selection extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use voxcat_core::error::CoreError;
use voxcat_db::ProjectContext;

use crate::error::AppError;
use crate::state::AppState;

/// Header naming the project a request operates on.
pub const PROJECT_HEADER: &str = "x-project";

/// The project selected by the `X-Project` request header.
///
/// Every catalog handler takes this extractor so the project is resolved
/// per request rather than held as server state:
///
/// ```ignore
/// async fn list(ActiveProject(ctx): ActiveProject) -> AppResult<Json<()>> {
///     tracing::debug!(project = ctx.name(), "listing");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ActiveProject(pub ProjectContext);

impl FromRequestParts<AppState> for ActiveProject {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let name = parts
            .headers
            .get(PROJECT_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .unwrap_or_default();

        if name.is_empty() {
            return Err(AppError::Core(CoreError::NoProjectSelected));
        }

        let ctx = state.store.project(name)?;
        Ok(ActiveProject(ctx))
    }
}
