//! Snapshot-based undo/redo.
//!
//! Every mutation saves the catalog as it was *before* the change onto the
//! undo stack and clears the redo stack. Undo pops the newest undo snapshot,
//! pushes the current catalog onto the redo stack under the same message and
//! writes the popped catalog back. Redo is the mirror image.
//!
//! Both stacks are bounded to
//! [`MAX_SNAPSHOTS`](voxcat_core::history::MAX_SNAPSHOTS) and persisted per
//! project, so history survives restarts.

use serde::Serialize;
use voxcat_core::history::{push_bounded, Direction, HistoryStatus};
use voxcat_core::types::EntityId;

use crate::models::catalog::Catalog;
use crate::models::snapshot::{Snapshot, SnapshotEntry};
use crate::repositories::{CatalogRepo, SnapshotRepo};
use crate::{ProjectContext, StoreError};

/// Outcome of a best-effort [`SnapshotManager::save`].
///
/// A skipped save means the mutation that follows will not be undoable; it
/// is logged and never stops the mutation itself.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotSaved {
    Saved { snapshot_id: EntityId, undo_depth: usize },
    Skipped { reason: String },
}

impl SnapshotSaved {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("Nothing to {0}")]
    Empty(Direction),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of an undo or redo.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryStep {
    pub direction: Direction,
    /// Message of the action that was undone or redone.
    pub message: String,
    /// The catalog as now stored.
    pub catalog: Catalog,
    pub status: HistoryStatus,
}

/// Newest-first entries of both stacks.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HistoryListing {
    pub undo: Vec<SnapshotEntry>,
    pub redo: Vec<SnapshotEntry>,
}

/// Manages the per-project undo and redo stacks.
pub struct SnapshotManager;

impl SnapshotManager {
    /// Record `before` (the catalog prior to the mutation about to happen)
    /// under `message`, clearing the redo stack.
    pub async fn save(ctx: &ProjectContext, message: &str, before: &Catalog) -> SnapshotSaved {
        match Self::try_save(ctx, message, before).await {
            Ok((snapshot_id, undo_depth)) => {
                tracing::debug!(
                    project = ctx.name(),
                    %snapshot_id,
                    undo_depth,
                    action = message,
                    "Snapshot saved"
                );
                SnapshotSaved::Saved {
                    snapshot_id,
                    undo_depth,
                }
            }
            Err(e) => {
                tracing::warn!(
                    project = ctx.name(),
                    action = message,
                    error = %e,
                    "Snapshot persistence failed; this change will not be undoable"
                );
                SnapshotSaved::Skipped {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn try_save(
        ctx: &ProjectContext,
        message: &str,
        before: &Catalog,
    ) -> Result<(EntityId, usize), StoreError> {
        SnapshotRepo::save(ctx, Direction::Redo, &[]).await?;

        let snapshot = Snapshot::new(message, before.clone());
        let snapshot_id = snapshot.id;

        let mut undo = SnapshotRepo::load(ctx, Direction::Undo).await?;
        push_bounded(&mut undo, snapshot);
        SnapshotRepo::save(ctx, Direction::Undo, &undo).await?;
        Ok((snapshot_id, undo.len()))
    }

    pub async fn undo(ctx: &ProjectContext) -> Result<HistoryStep, HistoryError> {
        Self::step(ctx, Direction::Undo).await
    }

    pub async fn redo(ctx: &ProjectContext) -> Result<HistoryStep, HistoryError> {
        Self::step(ctx, Direction::Redo).await
    }

    async fn step(ctx: &ProjectContext, direction: Direction) -> Result<HistoryStep, HistoryError> {
        let mut source = SnapshotRepo::load(ctx, direction).await?;
        if source.is_empty() {
            return Err(HistoryError::Empty(direction));
        }

        let current = CatalogRepo::read(ctx).await;
        let Some(target) = source.pop() else {
            return Err(HistoryError::Empty(direction));
        };

        // The mirror entry reuses the popped message so the undo/redo pair
        // for one action always reads the same.
        let mirror = Snapshot::new(target.message.clone(), current);
        let mut opposite = SnapshotRepo::load(ctx, direction.opposite()).await?;
        push_bounded(&mut opposite, mirror);
        SnapshotRepo::save(ctx, direction.opposite(), &opposite).await?;

        CatalogRepo::overwrite(ctx, &target.catalog).await?;
        SnapshotRepo::save(ctx, direction, &source).await?;

        let (undo, redo) = match direction {
            Direction::Undo => (&source, &opposite),
            Direction::Redo => (&opposite, &source),
        };
        let status = status_of(undo, redo);

        tracing::info!(
            project = ctx.name(),
            %direction,
            action = %target.message,
            undo_depth = status.count,
            redo_depth = status.redo_count,
            "History step applied"
        );

        Ok(HistoryStep {
            direction,
            message: target.message,
            catalog: target.catalog,
            status,
        })
    }

    /// Current stack depths and top messages. Read-only; an unreadable stack
    /// reports as empty.
    pub async fn refresh_state(ctx: &ProjectContext) -> HistoryStatus {
        let (undo, redo) = tokio::join!(
            SnapshotRepo::load(ctx, Direction::Undo),
            SnapshotRepo::load(ctx, Direction::Redo),
        );
        let undo = undo.unwrap_or_else(|e| {
            tracing::warn!(project = ctx.name(), error = %e, "Undo stack unreadable");
            Vec::new()
        });
        let redo = redo.unwrap_or_else(|e| {
            tracing::warn!(project = ctx.name(), error = %e, "Redo stack unreadable");
            Vec::new()
        });
        status_of(&undo, &redo)
    }

    /// Forget the undo history. The redo stack is left as is.
    pub async fn clear(ctx: &ProjectContext) -> Result<(), StoreError> {
        SnapshotRepo::save(ctx, Direction::Undo, &[]).await?;
        tracing::info!(project = ctx.name(), "Undo history cleared");
        Ok(())
    }

    /// Both stacks without catalog payloads, newest first.
    pub async fn list(ctx: &ProjectContext) -> Result<HistoryListing, StoreError> {
        let undo = SnapshotRepo::load(ctx, Direction::Undo).await?;
        let redo = SnapshotRepo::load(ctx, Direction::Redo).await?;
        Ok(HistoryListing {
            undo: undo.iter().rev().map(Snapshot::entry).collect(),
            redo: redo.iter().rev().map(Snapshot::entry).collect(),
        })
    }
}

fn status_of(undo: &[Snapshot], redo: &[Snapshot]) -> HistoryStatus {
    HistoryStatus::from_stacks(
        undo.len(),
        undo.last().map(|s| s.message.as_str()),
        redo.len(),
        redo.last().map(|s| s.message.as_str()),
    )
}
