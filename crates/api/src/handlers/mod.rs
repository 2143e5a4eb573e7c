//! Request handlers, one module per resource.
//!
//! Every catalog mutation follows the same sequence: read the catalog,
//! validate, build the history message, save the pre-mutation snapshot,
//! then write.

pub mod actor;
pub mod catalog;
pub mod item;
pub mod restore;
pub mod scene;
pub mod section;
pub mod snapshot;
pub mod take;

use serde::Serialize;
use voxcat_core::diff::{describe_changes, ChangeSet};
use voxcat_core::error::CoreError;
use voxcat_core::naming::{parse_name_list, partition_names, NamePartition};
use voxcat_db::history::{SnapshotManager, SnapshotSaved};
use voxcat_db::models::catalog::Catalog;
use voxcat_db::ProjectContext;

use crate::error::{AppError, AppResult};

/// Field-level changes between two versions of one entity.
pub(crate) fn diff_entities<T: Serialize>(old: &T, new: &T) -> AppResult<ChangeSet> {
    let old = serde_json::to_value(old).map_err(|e| AppError::InternalError(e.to_string()))?;
    let new = serde_json::to_value(new).map_err(|e| AppError::InternalError(e.to_string()))?;
    Ok(describe_changes(&old, &new))
}

/// Push `before` onto the undo stack under `message`.
///
/// A failed save is already logged by the manager; the mutation goes ahead
/// regardless and is simply not undoable.
pub(crate) async fn record_snapshot(ctx: &ProjectContext, message: &str, before: &Catalog) {
    if let SnapshotSaved::Skipped { reason } = SnapshotManager::save(ctx, message, before).await {
        tracing::debug!(project = ctx.name(), %reason, "Continuing without undo entry");
    }
}

/// Parse a comma-separated name list and drop names that already exist.
///
/// Fails when the list is empty, or when every name is a duplicate.
pub(crate) fn partition_batch<'a, I>(raw: &str, existing: I) -> AppResult<NamePartition>
where
    I: IntoIterator<Item = &'a str>,
{
    let names = parse_name_list(raw);
    if names.is_empty() {
        return Err(CoreError::Validation("At least one name is required".to_string()).into());
    }
    let partition = partition_names(&names, existing);
    if partition.new.is_empty() {
        return Err(CoreError::DuplicateName {
            names: partition.duplicates,
        }
        .into());
    }
    Ok(partition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn batch_rejects_empty_lists() {
        assert_matches!(
            partition_batch(" , ,", std::iter::empty::<&str>()),
            Err(AppError::Core(CoreError::Validation(_)))
        );
    }

    #[test]
    fn batch_rejects_all_duplicates() {
        assert_matches!(
            partition_batch("alice, ALICE", ["Alice"]),
            Err(AppError::Core(CoreError::DuplicateName { names })) if names == vec!["alice".to_string()]
        );
    }

    #[test]
    fn batch_keeps_new_names() {
        let partition = partition_batch("Alice, Bob, bob", ["Alice"]).unwrap();
        assert_eq!(partition.new, vec!["Bob".to_string()]);
        assert_eq!(partition.duplicates, vec!["Alice".to_string(), "bob".to_string()]);
    }
}
