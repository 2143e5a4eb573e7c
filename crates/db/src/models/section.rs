//! Section entity model and DTOs.
//!
//! A section groups content items of one [`ContentKind`] under an actor or a
//! scene. Its provider settings default to inheriting from the owner.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;
use voxcat_core::error::CoreError;
use voxcat_core::provider::{settings_errors, ContentKind, ProviderSettings};
use voxcat_core::types::{new_id, EntityId, Timestamp};
use voxcat_core::validation::{collect_field_errors, field_errors};

use crate::collection::Record;
use crate::models::owner::{OwnerRef, OwnerType};

/// A record from `sections.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Section {
    pub id: EntityId,
    pub owner_type: OwnerType,
    pub owner_id: EntityId,
    pub content_kind: ContentKind,
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub name: String,
    #[serde(default)]
    pub provider_settings: ProviderSettings,
    #[serde(default)]
    pub complete: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Record for Section {
    const FILE: &'static str = "sections.json";
    const ENTITY: &'static str = "Section";

    fn id(&self) -> EntityId {
        self.id
    }
}

impl Section {
    pub fn new(
        owner: OwnerRef,
        content_kind: ContentKind,
        name: impl Into<String>,
        provider_settings: ProviderSettings,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            owner_type: owner.owner_type,
            owner_id: owner.owner_id,
            content_kind,
            name: name.into(),
            provider_settings,
            complete: false,
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
        let mut fields = self
            .validate()
            .err()
            .map(|e| field_errors("", &e))
            .unwrap_or_default();
        fields.extend(settings_errors(&self.provider_settings));
        collect_field_errors(Self::ENTITY, fields)
    }

    pub fn apply(&self, input: &UpdateSection) -> Self {
        let mut next = self.clone();
        if let Some(name) = &input.name {
            next.name = name.trim().to_string();
        }
        if let Some(settings) = &input.provider_settings {
            next.provider_settings = settings.clone();
        }
        if let Some(complete) = input.complete {
            next.complete = complete;
        }
        next.updated_at = Utc::now();
        next
    }
}

/// DTO for creating sections under one owner. `name` may hold a
/// comma-separated list; every section gets the same kind and settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSections {
    pub owner_type: OwnerType,
    pub owner_id: EntityId,
    pub content_kind: ContentKind,
    pub name: String,
    #[serde(default)]
    pub provider_settings: ProviderSettings,
}

impl CreateSections {
    pub fn owner(&self) -> OwnerRef {
        OwnerRef {
            owner_type: self.owner_type,
            owner_id: self.owner_id,
        }
    }
}

/// DTO for updating an existing section. Owner and kind are fixed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSection {
    pub name: Option<String>,
    pub provider_settings: Option<ProviderSettings>,
    pub complete: Option<bool>,
}
