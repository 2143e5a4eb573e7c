use axum::routing::get;
use axum::Router;

use crate::handlers::section;
use crate::state::AppState;

/// Routes mounted at `/sections`.
///
/// ```text
/// GET    /?owner_id=                   -> list
/// POST   /                             -> create (comma-separated batch)
/// GET    /{id}                         -> get_by_id
/// PUT    /{id}                         -> update
/// DELETE /{id}                         -> delete (cascades)
/// GET    /{id}/effective-settings      -> effective_settings
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(section::list).post(section::create))
        .route(
            "/{id}",
            get(section::get_by_id)
                .put(section::update)
                .delete(section::delete),
        )
        .route("/{id}/effective-settings", get(section::effective_settings))
}
