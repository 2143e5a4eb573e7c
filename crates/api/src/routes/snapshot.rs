use axum::routing::{get, post};
use axum::Router;

use crate::handlers::snapshot;
use crate::state::AppState;

/// Routes mounted at `/snapshots`.
///
/// ```text
/// GET    /          -> status
/// DELETE /          -> clear (undo stack only)
/// GET    /history   -> history
/// POST   /undo      -> undo
/// POST   /redo      -> redo
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(snapshot::status).delete(snapshot::clear))
        .route("/history", get(snapshot::history))
        .route("/undo", post(snapshot::undo))
        .route("/redo", post(snapshot::redo))
}
