//! HTTP-level tests for undo/redo and restore.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_actor, delete, get, post_empty, post_json, put_json};
use serde_json::json;

#[tokio::test]
async fn undo_with_empty_history_is_400() {
    let (app, _dir) = build_test_app().await;

    let response = post_empty(&app, "/api/v1/snapshots/undo").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "NOTHING_TO_UNDO");

    let response = post_empty(&app, "/api/v1/snapshots/redo").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "NOTHING_TO_REDO");
}

#[tokio::test]
async fn undo_restores_previous_catalog() {
    let (app, _dir) = build_test_app().await;
    create_actor(&app, "Alice").await;
    create_actor(&app, "Bob").await;

    let response = post_empty(&app, "/api/v1/snapshots/undo").await;
    assert_eq!(response.status(), StatusCode::OK);
    let step = body_json(response).await["data"].clone();
    assert_eq!(step["direction"], "undo");
    assert_eq!(step["message"], "Create actor: Bob");
    assert_eq!(step["status"]["can_redo"], true);
    assert_eq!(step["status"]["redo_message"], "Create actor: Bob");

    let actors = body_json(get(&app, "/api/v1/actors").await).await;
    let names: Vec<&str> = actors["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["display_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Alice"]);

    let response = post_empty(&app, "/api/v1/snapshots/redo").await;
    assert_eq!(response.status(), StatusCode::OK);
    let actors = body_json(get(&app, "/api/v1/actors").await).await;
    assert_eq!(actors["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn a_new_edit_disables_redo() {
    let (app, _dir) = build_test_app().await;
    let actor = create_actor(&app, "Alice").await;
    let id = actor["id"].as_str().unwrap();
    put_json(&app, &format!("/api/v1/actors/{id}"), json!({ "complete": true })).await;

    post_empty(&app, "/api/v1/snapshots/undo").await;
    assert_eq!(common::history_status(&app).await["can_redo"], true);

    put_json(&app, &format!("/api/v1/actors/{id}"), json!({ "display_name": "Alicia" })).await;
    let status = common::history_status(&app).await;
    assert_eq!(status["can_redo"], false);
    assert_eq!(status["redo_count"], 0);
    assert_eq!(status["undo_message"], "Rename: Alice → Alicia");
}

#[tokio::test]
async fn history_listing_is_newest_first() {
    let (app, _dir) = build_test_app().await;
    create_actor(&app, "Alice").await;
    create_actor(&app, "Bob").await;
    post_empty(&app, "/api/v1/snapshots/undo").await;

    let listing = body_json(get(&app, "/api/v1/snapshots/history").await).await["data"].clone();
    assert_eq!(listing["undo"][0]["message"], "Create actor: Alice");
    assert_eq!(listing["redo"][0]["message"], "Create actor: Bob");
    assert!(listing["undo"][0].get("catalog").is_none());
}

#[tokio::test]
async fn clearing_keeps_redo() {
    let (app, _dir) = build_test_app().await;
    create_actor(&app, "Alice").await;
    create_actor(&app, "Bob").await;
    post_empty(&app, "/api/v1/snapshots/undo").await;

    let response = delete(&app, "/api/v1/snapshots").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let status = common::history_status(&app).await;
    assert_eq!(status["count"], 0);
    assert_eq!(status["can_undo"], false);
    assert_eq!(status["redo_count"], 1);
}

#[tokio::test]
async fn history_survives_restart() {
    let (app, dir) = build_test_app().await;
    create_actor(&app, "Alice").await;
    drop(app);

    let app = common::app_for(&dir).await;
    let status = common::history_status(&app).await;
    assert_eq!(status["count"], 1);
    assert_eq!(status["undo_message"], "Create actor: Alice");
}

// ---------------------------------------------------------------------------
// Restore
// ---------------------------------------------------------------------------

#[tokio::test]
async fn restore_reinserts_without_touching_history() {
    let (app, _dir) = build_test_app().await;
    let actor = create_actor(&app, "Alice").await;
    let id = actor["id"].as_str().unwrap().to_string();
    let section = body_json(
        post_json(
            &app,
            "/api/v1/sections",
            json!({
                "owner_type": "actor",
                "owner_id": id,
                "content_kind": "dialogue",
                "name": "Barks"
            }),
        )
        .await,
    )
    .await["data"]["created"][0]
        .clone();

    delete(&app, &format!("/api/v1/actors/{id}")).await;
    let before = common::history_status(&app).await;

    let response = post_json(
        &app,
        "/api/v1/restore",
        json!({ "actor": actor, "sections": [section], "items": [] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let report = body_json(response).await["data"].clone();
    assert_eq!(report["sections_restored"], 1);

    assert_eq!(common::history_status(&app).await, before);
    let catalog = body_json(get(&app, "/api/v1/catalog").await).await["data"].clone();
    assert_eq!(catalog["actors"][0]["display_name"], "Alice");
    assert_eq!(catalog["sections"][0]["name"], "Barks");
}

#[tokio::test]
async fn restore_of_existing_owner_conflicts() {
    let (app, _dir) = build_test_app().await;
    let actor = create_actor(&app, "Alice").await;

    let response = post_json(&app, "/api/v1/restore", json!({ "actor": actor })).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn restore_needs_exactly_one_owner() {
    let (app, _dir) = build_test_app().await;
    let response = post_json(&app, "/api/v1/restore", json!({ "sections": [] })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
