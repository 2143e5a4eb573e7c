//! Content item model and DTOs.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;
use voxcat_core::error::CoreError;
use voxcat_core::types::{new_id, EntityId, Timestamp};
use voxcat_core::validation::validate_entity;

use crate::collection::Record;
use crate::models::owner::{OwnerRef, OwnerType};

/// A record from `items.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Item {
    pub id: EntityId,
    pub owner_type: OwnerType,
    pub owner_id: EntityId,
    /// `None` for ungrouped items.
    #[serde(default)]
    pub section_id: Option<EntityId>,
    #[validate(length(min = 1, max = 128, message = "must be between 1 and 128 characters"))]
    pub cue_id: String,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub prompt: String,
    #[validate(length(min = 1, max = 255))]
    pub filename: String,
    /// True once the item has takes and every take is approved.
    #[serde(default)]
    pub all_approved: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Record for Item {
    const FILE: &'static str = "items.json";
    const ENTITY: &'static str = "Item";

    fn id(&self) -> EntityId {
        self.id
    }
}

impl Item {
    pub fn new(
        owner: OwnerRef,
        section_id: Option<EntityId>,
        cue_id: impl Into<String>,
        prompt: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            owner_type: owner.owner_type,
            owner_id: owner.owner_id,
            section_id,
            cue_id: cue_id.into(),
            prompt: prompt.into(),
            filename: filename.into(),
            all_approved: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn owner(&self) -> OwnerRef {
        OwnerRef {
            owner_type: self.owner_type,
            owner_id: self.owner_id,
        }
    }

    pub fn check(&self) -> Result<(), CoreError> {
        validate_entity(Self::ENTITY, self)
    }

    pub fn apply(&self, input: &UpdateItem) -> Self {
        let mut next = self.clone();
        if let Some(cue_id) = &input.cue_id {
            next.cue_id = cue_id.trim().to_string();
        }
        if let Some(prompt) = &input.prompt {
            next.prompt = prompt.clone();
        }
        if let Some(filename) = &input.filename {
            next.filename = filename.clone();
        }
        if let Some(section_id) = input.section_id {
            next.section_id = section_id;
        }
        next.updated_at = Utc::now();
        next
    }
}

/// DTO for creating a content item. `filename` is derived from the owner and
/// cue when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItem {
    pub owner_type: OwnerType,
    pub owner_id: EntityId,
    pub section_id: Option<EntityId>,
    pub cue_id: String,
    #[serde(default)]
    pub prompt: String,
    pub filename: Option<String>,
}

impl CreateItem {
    pub fn owner(&self) -> OwnerRef {
        OwnerRef {
            owner_type: self.owner_type,
            owner_id: self.owner_id,
        }
    }
}

/// DTO for updating an item. `"section_id": null` moves the item out of its
/// section; omitting the field leaves it in place.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateItem {
    pub cue_id: Option<String>,
    pub prompt: Option<String>,
    pub filename: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub section_id: Option<Option<EntityId>>,
}
