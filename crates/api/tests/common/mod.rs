//! Shared harness for HTTP-level tests.
//!
//! Requests go straight through the router with `tower::ServiceExt::oneshot`,
//! no TCP listener. Every test gets its own temporary data directory.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use voxcat_api::config::ServerConfig;
use voxcat_api::router::build_app_router;
use voxcat_api::state::AppState;
use voxcat_db::StoreRoot;

/// Project every helper request targets.
pub const PROJECT: &str = "test-project";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(data_dir: &TempDir) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        data_dir: data_dir.path().to_path_buf(),
    }
}

/// A router over a fresh temporary store.
///
/// Keep the returned [`TempDir`] alive for as long as the test uses the app.
pub async fn build_test_app() -> (Router, TempDir) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let app = app_for(&dir).await;
    (app, dir)
}

/// A router over an existing data directory.
pub async fn app_for(dir: &TempDir) -> Router {
    let config = test_config(dir);
    let store = StoreRoot::open(dir.path()).await.expect("open store");
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

fn request(method: &str, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-project", PROJECT);
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, request("GET", uri, None)).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, request("POST", uri, Some(body))).await
}

pub async fn post_empty(app: &Router, uri: &str) -> Response<Body> {
    send(app, request("POST", uri, None)).await
}

pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, request("PUT", uri, Some(body))).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    send(app, request("DELETE", uri, None)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create one actor and return its JSON.
pub async fn create_actor(app: &Router, name: &str) -> serde_json::Value {
    let response = post_json(app, "/api/v1/actors", serde_json::json!({ "display_name": name })).await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"]["created"][0].clone()
}

/// Undo/redo status of the test project.
pub async fn history_status(app: &Router) -> serde_json::Value {
    body_json(get(app, "/api/v1/snapshots").await).await["data"].clone()
}
