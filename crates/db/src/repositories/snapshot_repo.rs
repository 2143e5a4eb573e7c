//! Persistence of the undo and redo stacks.

use voxcat_core::history::{Direction, MAX_SNAPSHOTS};

use crate::collection::{read_json, write_json};
use crate::models::snapshot::Snapshot;
use crate::{ProjectContext, StoreError};

/// Stack file for `direction`, relative to the project directory.
pub fn stack_file(direction: Direction) -> &'static str {
    match direction {
        Direction::Undo => "history/undo.json",
        Direction::Redo => "history/redo.json",
    }
}

/// Reads and writes one history stack file (oldest snapshot first).
pub struct SnapshotRepo;

impl SnapshotRepo {
    /// Load a stack. A missing file is an empty stack; a file holding more
    /// than [`MAX_SNAPSHOTS`] entries keeps only the newest ones.
    pub async fn load(
        ctx: &ProjectContext,
        direction: Direction,
    ) -> Result<Vec<Snapshot>, StoreError> {
        let mut stack: Vec<Snapshot> = match read_json(&ctx.file(stack_file(direction))).await {
            Err(e) if e.is_not_found() => return Ok(Vec::new()),
            other => other?,
        };
        if stack.len() > MAX_SNAPSHOTS {
            let excess = stack.len() - MAX_SNAPSHOTS;
            tracing::warn!(
                project = ctx.name(),
                %direction,
                excess,
                "History stack over its bound; dropping oldest entries"
            );
            stack.drain(..excess);
        }
        Ok(stack)
    }

    /// Overwrite a stack.
    pub async fn save(
        ctx: &ProjectContext,
        direction: Direction,
        stack: &[Snapshot],
    ) -> Result<(), StoreError> {
        write_json(&ctx.file(stack_file(direction)), stack).await
    }
}
