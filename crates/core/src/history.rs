//! Undo/redo history constants, stack bounding, and message builders.

use serde::{Deserialize, Serialize};

use crate::diff::ChangeSet;

/// Maximum number of snapshots kept on each history stack.
pub const MAX_SNAPSHOTS: usize = 50;

/// Which stack a history step pops from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Undo,
    Redo,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Undo => "undo",
            Self::Redo => "redo",
        }
    }

    /// The stack that receives the mirrored snapshot.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Undo => Self::Redo,
            Self::Redo => Self::Undo,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append `entry` and evict the oldest entries beyond [`MAX_SNAPSHOTS`].
///
/// Stacks are stored oldest-first, so eviction drains from the front.
pub fn push_bounded<T>(stack: &mut Vec<T>, entry: T) {
    stack.push(entry);
    if stack.len() > MAX_SNAPSHOTS {
        let excess = stack.len() - MAX_SNAPSHOTS;
        stack.drain(..excess);
    }
}

/// What the client needs to render undo/redo affordances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryStatus {
    /// Undo stack depth.
    pub count: usize,
    pub can_undo: bool,
    pub undo_message: Option<String>,
    pub redo_count: usize,
    pub can_redo: bool,
    pub redo_message: Option<String>,
}

impl HistoryStatus {
    /// Build a status from stack depths and top-of-stack messages.
    pub fn from_stacks(
        undo_len: usize,
        undo_top: Option<&str>,
        redo_len: usize,
        redo_top: Option<&str>,
    ) -> Self {
        Self {
            count: undo_len,
            can_undo: undo_len > 0,
            undo_message: undo_top.map(str::to_string),
            redo_count: redo_len,
            can_redo: redo_len > 0,
            redo_message: redo_top.map(str::to_string),
        }
    }
}

// ---------------------------------------------------------------------------
// Message builders
// ---------------------------------------------------------------------------

/// Catalog entity kinds as they appear in history messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Actor,
    Scene,
    Section,
    Item,
}

impl EntityKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Actor => "actor",
            Self::Scene => "scene",
            Self::Section => "section",
            Self::Item => "content",
        }
    }

    fn plural(&self) -> &'static str {
        match self {
            Self::Actor => "actors",
            Self::Scene => "scenes",
            Self::Section => "sections",
            Self::Item => "content items",
        }
    }
}

/// `Create actor: Alice`, or `Create 2 actors: Alice, Bob` for a batch.
pub fn create_message(kind: EntityKind, names: &[String]) -> String {
    match names {
        [single] => format!("Create {}: {single}", kind.label()),
        many => format!("Create {} {}: {}", many.len(), kind.plural(), many.join(", ")),
    }
}

/// `Delete section: Alice / Barks`
pub fn delete_message(kind: EntityKind, path: &str) -> String {
    format!("Delete {}: {path}", kind.label())
}

/// Message for an update.
///
/// A name change takes priority over every other change and is phrased as
/// `Rename: old → new`. Otherwise a single change is spelled out and several
/// are counted. Returns `None` when nothing changed.
pub fn update_message(
    path: &str,
    rename: Option<(&str, &str)>,
    changes: &ChangeSet,
) -> Option<String> {
    if let Some((old, new)) = rename {
        if old != new {
            return Some(format!("Rename: {old} → {new}"));
        }
    }
    match changes.len() {
        0 => None,
        1 => Some(format!("Update: {path} ({})", changes.changes[0])),
        n => Some(format!("Update: {path} ({n} changes)")),
    }
}

/// Summary returned when a batch create skipped some names.
pub fn duplicates_warning(kind: EntityKind, created: usize, skipped: &[String]) -> String {
    format!(
        "Created {created} {}, skipped {} existing: {}",
        if created == 1 { kind.label() } else { kind.plural() },
        skipped.len(),
        skipped.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::describe_changes;
    use serde_json::json;

    #[test]
    fn push_bounded_evicts_oldest() {
        let mut stack: Vec<usize> = (0..MAX_SNAPSHOTS).collect();
        push_bounded(&mut stack, 999);
        assert_eq!(stack.len(), MAX_SNAPSHOTS);
        assert_eq!(stack[0], 1);
        assert_eq!(*stack.last().unwrap(), 999);
    }

    #[test]
    fn push_bounded_below_limit_keeps_everything() {
        let mut stack = vec![1, 2];
        push_bounded(&mut stack, 3);
        assert_eq!(stack, vec![1, 2, 3]);
    }

    #[test]
    fn push_bounded_trims_oversized_stack() {
        let mut stack: Vec<usize> = (0..MAX_SNAPSHOTS + 5).collect();
        push_bounded(&mut stack, 1000);
        assert_eq!(stack.len(), MAX_SNAPSHOTS);
        assert_eq!(stack[0], 6);
    }

    #[test]
    fn status_from_empty_stacks() {
        let status = HistoryStatus::from_stacks(0, None, 0, None);
        assert!(!status.can_undo);
        assert!(!status.can_redo);
        assert_eq!(status.undo_message, None);
    }

    #[test]
    fn status_carries_top_messages() {
        let status = HistoryStatus::from_stacks(3, Some("Create actor: A"), 1, Some("Delete actor: B"));
        assert_eq!(status.count, 3);
        assert!(status.can_undo && status.can_redo);
        assert_eq!(status.undo_message.as_deref(), Some("Create actor: A"));
        assert_eq!(status.redo_message.as_deref(), Some("Delete actor: B"));
    }

    #[test]
    fn create_messages() {
        assert_eq!(
            create_message(EntityKind::Actor, &["Alice".into()]),
            "Create actor: Alice"
        );
        assert_eq!(
            create_message(EntityKind::Section, &["A".into(), "B".into()]),
            "Create 2 sections: A, B"
        );
    }

    #[test]
    fn rename_takes_priority() {
        let changes = describe_changes(
            &json!({"display_name": "A", "complete": false}),
            &json!({"display_name": "B", "complete": true}),
        );
        assert_eq!(
            update_message("A", Some(("A", "B")), &changes).unwrap(),
            "Rename: A → B"
        );
    }

    #[test]
    fn single_and_multiple_updates() {
        let one = describe_changes(&json!({"complete": false}), &json!({"complete": true}));
        assert_eq!(
            update_message("Alice", None, &one).unwrap(),
            "Update: Alice (complete: false → true)"
        );

        let two = describe_changes(
            &json!({"complete": false, "prompt": "a"}),
            &json!({"complete": true, "prompt": "b"}),
        );
        assert_eq!(
            update_message("Alice / Barks", Some(("x", "x")), &two).unwrap(),
            "Update: Alice / Barks (2 changes)"
        );
    }

    #[test]
    fn no_changes_means_no_message() {
        let none = describe_changes(&json!({"a": 1}), &json!({"a": 1}));
        assert_eq!(update_message("x", None, &none), None);
    }

    #[test]
    fn direction_opposites() {
        assert_eq!(Direction::Undo.opposite(), Direction::Redo);
        assert_eq!(Direction::Redo.opposite(), Direction::Undo);
    }
}
