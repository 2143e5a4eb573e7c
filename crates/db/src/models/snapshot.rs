//! History snapshot records.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use voxcat_core::types::{new_id, EntityId, Timestamp};

use crate::models::catalog::Catalog;

/// A full catalog copy tagged with the action it precedes. Never mutated
/// once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: EntityId,
    pub timestamp: Timestamp,
    pub message: String,
    pub catalog: Catalog,
}

impl Snapshot {
    pub fn new(message: impl Into<String>, catalog: Catalog) -> Self {
        Self {
            id: new_id(),
            timestamp: Utc::now(),
            message: message.into(),
            catalog,
        }
    }

    pub fn entry(&self) -> SnapshotEntry {
        SnapshotEntry {
            id: self.id,
            timestamp: self.timestamp,
            message: self.message.clone(),
        }
    }
}

/// A snapshot without its catalog payload, for history listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotEntry {
    pub id: EntityId,
    pub timestamp: Timestamp,
    pub message: String,
}
