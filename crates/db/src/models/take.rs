//! Take model and DTOs.
//!
//! Takes are generated renditions of a content item. They are stored in
//! their own collection and are not part of catalog snapshots.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;
use voxcat_core::error::CoreError;
use voxcat_core::types::{new_id, EntityId, Timestamp};
use voxcat_core::validation::validate_entity;

use crate::collection::Record;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TakeStatus {
    #[default]
    New,
    Approved,
    Rejected,
}

/// A record from `takes.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Take {
    pub id: EntityId,
    pub item_id: EntityId,
    #[serde(default)]
    pub status: TakeStatus,
    #[validate(length(min = 1, max = 255))]
    pub filename: String,
    /// Provider parameters the take was generated with.
    #[serde(default)]
    pub generation_params: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Record for Take {
    const FILE: &'static str = "takes.json";
    const ENTITY: &'static str = "Take";

    fn id(&self) -> EntityId {
        self.id
    }
}

impl Take {
    pub fn new(
        item_id: EntityId,
        status: TakeStatus,
        filename: impl Into<String>,
        generation_params: serde_json::Value,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            item_id,
            status,
            filename: filename.into(),
            generation_params,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn check(&self) -> Result<(), CoreError> {
        validate_entity(Self::ENTITY, self)?;
        if !(self.generation_params.is_object() || self.generation_params.is_null()) {
            return Err(CoreError::Validation(
                "generation_params must be a JSON object".to_string(),
            ));
        }
        Ok(())
    }

    pub fn apply(&self, input: &UpdateTake) -> Self {
        let mut next = self.clone();
        if let Some(status) = input.status {
            next.status = status;
        }
        if let Some(params) = &input.generation_params {
            next.generation_params = params.clone();
        }
        next.updated_at = Utc::now();
        next
    }
}

/// Whether an item with these takes counts as fully approved.
pub fn all_approved(takes: &[Take]) -> bool {
    !takes.is_empty() && takes.iter().all(|t| t.status == TakeStatus::Approved)
}

/// DTO for registering a take against an item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTake {
    pub status: Option<TakeStatus>,
    pub filename: Option<String>,
    pub generation_params: Option<serde_json::Value>,
}

/// DTO for updating a take (typically its review status).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTake {
    pub status: Option<TakeStatus>,
    pub generation_params: Option<serde_json::Value>,
}
