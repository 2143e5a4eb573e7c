//! The actor-or-scene owner role of sections and items.

use serde::{Deserialize, Serialize};
use voxcat_core::types::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerType {
    Actor,
    Scene,
}

impl OwnerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Actor => "actor",
            Self::Scene => "scene",
        }
    }

    /// Entity name used in `NotFound` errors.
    pub fn entity(&self) -> &'static str {
        match self {
            Self::Actor => "Actor",
            Self::Scene => "Scene",
        }
    }
}

impl std::fmt::Display for OwnerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A weak reference to an actor or scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerRef {
    pub owner_type: OwnerType,
    pub owner_id: EntityId,
}

impl OwnerRef {
    pub fn actor(id: EntityId) -> Self {
        Self {
            owner_type: OwnerType::Actor,
            owner_id: id,
        }
    }

    pub fn scene(id: EntityId) -> Self {
        Self {
            owner_type: OwnerType::Scene,
            owner_id: id,
        }
    }
}
