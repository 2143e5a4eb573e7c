use axum::routing::get;
use axum::Router;

use crate::handlers::{item, take};
use crate::state::AppState;

/// Routes mounted at `/items`.
///
/// ```text
/// GET    /?section_id=&owner_id=       -> list
/// POST   /                             -> create
/// GET    /{id}                         -> get_by_id
/// PUT    /{id}                         -> update
/// DELETE /{id}                         -> delete (removes takes)
/// GET    /{id}/takes                   -> take::list_by_item
/// POST   /{id}/takes                   -> take::create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(item::list).post(item::create))
        .route(
            "/{id}",
            get(item::get_by_id).put(item::update).delete(item::delete),
        )
        .route("/{id}/takes", get(take::list_by_item).post(take::create))
}
