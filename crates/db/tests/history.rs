//! Integration tests for snapshot-based undo/redo.
//!
//! Exercises the snapshot manager against a real project directory:
//! - Stack bounding
//! - Redo invalidation on new saves
//! - Undo/redo round trips and message symmetry
//! - Takes surviving undo untouched

use assert_matches::assert_matches;
use voxcat_core::history::{Direction, MAX_SNAPSHOTS};
use voxcat_core::provider::ProviderSettingsMap;
use voxcat_db::history::{HistoryError, SnapshotManager, SnapshotSaved};
use voxcat_db::models::actor::Actor;
use voxcat_db::models::item::Item;
use voxcat_db::models::owner::OwnerRef;
use voxcat_db::models::take::{Take, TakeStatus};
use voxcat_db::models::snapshot::Snapshot;
use voxcat_db::repositories::{ActorRepo, CatalogRepo, ItemRepo, SnapshotRepo, TakeRepo};
use voxcat_db::{ProjectContext, StoreRoot};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn project() -> (tempfile::TempDir, ProjectContext) {
    let dir = tempfile::tempdir().unwrap();
    let store = StoreRoot::open(dir.path()).await.unwrap();
    let ctx = store.project("demo").unwrap();
    (dir, ctx)
}

/// Snapshot, then add an actor, the way every mutation does.
async fn create_actor(ctx: &ProjectContext, name: &str) -> Actor {
    let before = CatalogRepo::read(ctx).await;
    let saved = SnapshotManager::save(ctx, &format!("Create actor: {name}"), &before).await;
    assert!(saved.is_saved());
    let actor = Actor::new(name, name.to_lowercase(), ProviderSettingsMap::new());
    ActorRepo::insert_many(ctx, std::slice::from_ref(&actor))
        .await
        .unwrap();
    actor
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn undo_on_empty_history_fails() {
    let (_dir, ctx) = project().await;
    assert_matches!(
        SnapshotManager::undo(&ctx).await,
        Err(HistoryError::Empty(Direction::Undo))
    );
    assert_matches!(
        SnapshotManager::redo(&ctx).await,
        Err(HistoryError::Empty(Direction::Redo))
    );
}

#[tokio::test]
async fn undo_stack_is_bounded_and_keeps_latest() {
    let (_dir, ctx) = project().await;
    for i in 0..MAX_SNAPSHOTS + 5 {
        let saved = SnapshotManager::save(&ctx, &format!("step {i}"), &Default::default()).await;
        assert_matches!(saved, SnapshotSaved::Saved { .. });
    }

    let status = SnapshotManager::refresh_state(&ctx).await;
    assert_eq!(status.count, MAX_SNAPSHOTS);
    assert_eq!(status.undo_message.as_deref(), Some("step 54"));

    let listing = SnapshotManager::list(&ctx).await.unwrap();
    assert_eq!(listing.undo.len(), MAX_SNAPSHOTS);
    assert_eq!(listing.undo[0].message, "step 54");
    assert_eq!(listing.undo[MAX_SNAPSHOTS - 1].message, "step 5");
}

#[tokio::test]
async fn oversized_stack_on_disk_is_trimmed_on_load() {
    let (_dir, ctx) = project().await;
    let stack: Vec<Snapshot> = (0..MAX_SNAPSHOTS + 10)
        .map(|i| Snapshot::new(format!("old {i}"), Default::default()))
        .collect();
    SnapshotRepo::save(&ctx, Direction::Undo, &stack).await.unwrap();

    let status = SnapshotManager::refresh_state(&ctx).await;
    assert_eq!(status.count, MAX_SNAPSHOTS);
    assert_eq!(status.undo_message.as_deref(), Some("old 59"));

    let step = SnapshotManager::undo(&ctx).await.unwrap();
    assert_eq!(step.message, "old 59");
    assert_eq!(step.status.count, MAX_SNAPSHOTS - 1);
    assert_eq!(step.status.redo_count, 1);
}

#[tokio::test]
async fn undo_then_redo_restores_each_state() {
    let (_dir, ctx) = project().await;
    let empty = CatalogRepo::read(&ctx).await;
    create_actor(&ctx, "Alice").await;
    let after_alice = CatalogRepo::read(&ctx).await;
    create_actor(&ctx, "Bob").await;
    let after_bob = CatalogRepo::read(&ctx).await;

    let step = SnapshotManager::undo(&ctx).await.unwrap();
    assert_eq!(step.message, "Create actor: Bob");
    assert_eq!(CatalogRepo::read(&ctx).await, after_alice);

    let step = SnapshotManager::undo(&ctx).await.unwrap();
    assert_eq!(step.message, "Create actor: Alice");
    assert_eq!(CatalogRepo::read(&ctx).await, empty);
    assert!(!step.status.can_undo);
    assert_eq!(step.status.redo_count, 2);

    let step = SnapshotManager::redo(&ctx).await.unwrap();
    assert_eq!(step.message, "Create actor: Alice");
    assert_eq!(CatalogRepo::read(&ctx).await, after_alice);

    let step = SnapshotManager::redo(&ctx).await.unwrap();
    assert_eq!(step.message, "Create actor: Bob");
    assert_eq!(CatalogRepo::read(&ctx).await, after_bob);
    assert!(!step.status.can_redo);
    assert_eq!(step.status.count, 2);
}

#[tokio::test]
async fn undo_and_redo_messages_mirror() {
    let (_dir, ctx) = project().await;
    create_actor(&ctx, "Alice").await;

    let status = SnapshotManager::refresh_state(&ctx).await;
    assert_eq!(status.undo_message.as_deref(), Some("Create actor: Alice"));

    SnapshotManager::undo(&ctx).await.unwrap();
    let status = SnapshotManager::refresh_state(&ctx).await;
    assert_eq!(status.redo_message.as_deref(), Some("Create actor: Alice"));
    assert_eq!(status.undo_message, None);
}

#[tokio::test]
async fn new_save_invalidates_redo() {
    let (_dir, ctx) = project().await;
    create_actor(&ctx, "Alice").await;
    SnapshotManager::undo(&ctx).await.unwrap();
    assert!(SnapshotManager::refresh_state(&ctx).await.can_redo);

    create_actor(&ctx, "Carol").await;
    let status = SnapshotManager::refresh_state(&ctx).await;
    assert!(!status.can_redo);
    assert_eq!(status.redo_count, 0);
    assert_eq!(status.count, 1);
}

#[tokio::test]
async fn clear_forgets_undo_only() {
    let (_dir, ctx) = project().await;
    create_actor(&ctx, "Alice").await;
    create_actor(&ctx, "Bob").await;
    SnapshotManager::undo(&ctx).await.unwrap();

    SnapshotManager::clear(&ctx).await.unwrap();
    let status = SnapshotManager::refresh_state(&ctx).await;
    assert_eq!(status.count, 0);
    assert_eq!(status.redo_count, 1);
}

#[tokio::test]
async fn takes_are_not_rolled_back_by_undo() {
    let (_dir, ctx) = project().await;
    let actor = create_actor(&ctx, "Alice").await;
    let owner = OwnerRef::actor(actor.id);

    let before = CatalogRepo::read(&ctx).await;
    let _ = SnapshotManager::save(&ctx, "Create content: cue_01", &before).await;
    let item = Item::new(owner, None, "cue_01", "Hello", "alice_cue_01.mp3");
    ItemRepo::insert_many(&ctx, std::slice::from_ref(&item))
        .await
        .unwrap();

    let take = Take::new(item.id, TakeStatus::Approved, "alice_cue_01_take_1.mp3", serde_json::json!({}));
    TakeRepo::create(&ctx, &take).await.unwrap();

    SnapshotManager::undo(&ctx).await.unwrap();
    assert!(ItemRepo::find_by_id(&ctx, item.id).await.unwrap().is_none());
    assert_eq!(TakeRepo::list(&ctx).await.unwrap(), vec![take]);
}

#[tokio::test]
async fn history_survives_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = StoreRoot::open(dir.path()).await.unwrap();
        let ctx = store.project("demo").unwrap();
        create_actor(&ctx, "Alice").await;
    }
    let store = StoreRoot::open(dir.path()).await.unwrap();
    let ctx = store.project("demo").unwrap();
    let status = SnapshotManager::refresh_state(&ctx).await;
    assert_eq!(status.count, 1);
    assert_eq!(status.undo_message.as_deref(), Some("Create actor: Alice"));
}

#[tokio::test]
async fn projects_keep_separate_histories() {
    let dir = tempfile::tempdir().unwrap();
    let store = StoreRoot::open(dir.path()).await.unwrap();
    let one = store.project("one").unwrap();
    let two = store.project("two").unwrap();

    create_actor(&one, "Alice").await;
    assert_eq!(SnapshotManager::refresh_state(&one).await.count, 1);
    assert_eq!(SnapshotManager::refresh_state(&two).await.count, 0);
    assert!(CatalogRepo::read(&two).await.actors.is_empty());
}
