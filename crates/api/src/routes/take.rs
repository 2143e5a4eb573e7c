use axum::routing::put;
use axum::Router;

use crate::handlers::take;
use crate::state::AppState;

/// Routes mounted at `/takes`.
///
/// ```text
/// PUT    /{id}     -> update
/// DELETE /{id}     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", put(take::update).delete(take::delete))
}
