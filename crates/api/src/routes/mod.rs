pub mod actor;
pub mod health;
pub mod item;
pub mod scene;
pub mod section;
pub mod snapshot;
pub mod take;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Every route requires an `X-Project` header naming the project.
///
/// ```text
/// /catalog                                         whole catalog
/// /actors[/{id}]                                   actors
/// /scenes[/{id}]                                   scenes
/// /sections[/{id}[/effective-settings]]            sections
/// /items[/{id}[/takes]]                            content items
/// /takes/{id}                                      takes
/// /restore                                         restore deleted owner
/// /snapshots[/history|/undo|/redo]                 undo/redo history
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/catalog", get(handlers::catalog::get_catalog))
        .route("/restore", post(handlers::restore::restore))
        .nest("/actors", actor::router())
        .nest("/scenes", scene::router())
        .nest("/sections", section::router())
        .nest("/items", item::router())
        .nest("/takes", take::router())
        .nest("/snapshots", snapshot::router())
}
