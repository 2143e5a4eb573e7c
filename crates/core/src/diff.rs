//! Field-by-field comparison of two versions of an entity.
//!
//! Produces the short human-readable change phrases that end up in history
//! messages (e.g. `provider_settings.dialogue.stability: 0.5 → 0.8`).

use serde::Serialize;
use serde_json::{Map, Value};

/// Fields that change on every write and never count as an edit.
pub const IGNORED_FIELDS: &[&str] = &["id", "created_at", "updated_at"];

/// Rendering for a missing or null value.
pub const NONE_LABEL: &str = "(none)";

/// The status of a single key in a diff comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffStatus {
    Added,
    Removed,
    Changed,
}

/// One changed field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldChange {
    /// Dotted path of the field (`provider_settings.sfx.mode`).
    pub path: String,
    pub old: Option<Value>,
    pub new: Option<Value>,
    pub status: DiffStatus,
}

impl FieldChange {
    /// `path: old → new`
    pub fn describe(&self) -> String {
        format!(
            "{}: {} → {}",
            self.path,
            render_value(self.old.as_ref()),
            render_value(self.new.as_ref())
        )
    }
}

/// Result of [`describe_changes`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeSet {
    pub has_changes: bool,
    pub changes: Vec<String>,
    pub summary: String,
    #[serde(skip)]
    pub fields: Vec<FieldChange>,
}

impl ChangeSet {
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Whether the field at `path` is among the changes.
    pub fn touches(&self, path: &str) -> bool {
        self.fields.iter().any(|f| f.path == path)
    }
}

/// Compare two field maps of the same entity.
///
/// Non-object inputs are treated as empty objects. Nested objects are walked
/// so each leaf change is reported separately; arrays are compared as whole
/// values. Changes come out sorted by path.
pub fn describe_changes(old: &Value, new: &Value) -> ChangeSet {
    let empty = Map::new();
    let old_obj = old.as_object().unwrap_or(&empty);
    let new_obj = new.as_object().unwrap_or(&empty);

    let mut fields = Vec::new();
    collect_changes("", old_obj, new_obj, &mut fields, true);

    let changes: Vec<String> = fields.iter().map(FieldChange::describe).collect();
    let summary = match changes.len() {
        0 => "No changes".to_string(),
        1 => changes[0].clone(),
        n => format!("{n} changes"),
    };

    ChangeSet {
        has_changes: !changes.is_empty(),
        changes,
        summary,
        fields,
    }
}

fn collect_changes(
    prefix: &str,
    old: &Map<String, Value>,
    new: &Map<String, Value>,
    out: &mut Vec<FieldChange>,
    top_level: bool,
) {
    let mut keys: Vec<&String> = old.keys().chain(new.keys()).collect();
    keys.sort();
    keys.dedup();

    for key in keys {
        if top_level && IGNORED_FIELDS.contains(&key.as_str()) {
            continue;
        }
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        let old_val = old.get(key).filter(|v| !v.is_null());
        let new_val = new.get(key).filter(|v| !v.is_null());

        match (old_val, new_val) {
            (Some(Value::Object(a)), Some(Value::Object(b))) => {
                collect_changes(&path, a, b, out, false);
            }
            (Some(a), Some(b)) if a == b => {}
            (None, None) => {}
            (a, b) => {
                let status = match (a, b) {
                    (None, Some(_)) => DiffStatus::Added,
                    (Some(_), None) => DiffStatus::Removed,
                    _ => DiffStatus::Changed,
                };
                out.push(FieldChange {
                    path,
                    old: a.cloned(),
                    new: b.cloned(),
                    status,
                });
            }
        }
    }
}

fn render_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => NONE_LABEL.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
