use std::sync::Arc;

use voxcat_db::StoreRoot;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Root of the per-project file store.
    pub store: StoreRoot,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
