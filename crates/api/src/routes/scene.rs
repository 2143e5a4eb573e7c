use axum::routing::get;
use axum::Router;

use crate::handlers::scene;
use crate::state::AppState;

/// Routes mounted at `/scenes`.
///
/// ```text
/// GET    /         -> list
/// POST   /         -> create (comma-separated batch)
/// GET    /{id}     -> get_by_id
/// PUT    /{id}     -> update
/// DELETE /{id}     -> delete (cascades)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(scene::list).post(scene::create))
        .route(
            "/{id}",
            get(scene::get_by_id).put(scene::update).delete(scene::delete),
        )
}
