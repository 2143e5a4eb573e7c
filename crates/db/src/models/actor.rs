//! Actor entity model and DTOs.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;
use voxcat_core::error::{CoreError, FieldError};
use voxcat_core::naming::slugify;
use voxcat_core::provider::{settings_map_errors, ProviderSettingsMap};
use voxcat_core::types::{new_id, EntityId, Timestamp};
use voxcat_core::validation::{collect_field_errors, field_errors};

use crate::collection::Record;

/// A record from `actors.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Actor {
    pub id: EntityId,
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub display_name: String,
    /// Derived slug of the display name; prefix of every generated file.
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub base_filename: String,
    #[serde(default)]
    pub provider_settings: ProviderSettingsMap,
    #[serde(default)]
    pub complete: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Record for Actor {
    const FILE: &'static str = "actors.json";
    const ENTITY: &'static str = "Actor";

    fn id(&self) -> EntityId {
        self.id
    }
}

impl Actor {
    pub fn new(
        display_name: impl Into<String>,
        base_filename: impl Into<String>,
        provider_settings: ProviderSettingsMap,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            display_name: display_name.into(),
            base_filename: base_filename.into(),
            provider_settings,
            complete: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Schema check run on every constructed or edited actor.
    pub fn check(&self) -> Result<(), CoreError> {
        let mut fields = self
            .validate()
            .err()
            .map(|e| field_errors("", &e))
            .unwrap_or_default();
        if !self.base_filename.is_empty() && slugify(&self.base_filename) != self.base_filename {
            fields.push(FieldError {
                field: "base_filename".into(),
                message: "must be lowercase letters, digits and single underscores".into(),
            });
        }
        fields.extend(settings_map_errors(&self.provider_settings));
        collect_field_errors(Self::ENTITY, fields)
    }

    /// Copy of `self` with `input` applied and `updated_at` bumped.
    pub fn apply(&self, input: &UpdateActor) -> Self {
        let mut next = self.clone();
        if let Some(name) = &input.display_name {
            next.display_name = name.trim().to_string();
        }
        if let Some(base) = &input.base_filename {
            next.base_filename = base.clone();
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

/// DTO for creating actors. `display_name` may hold a comma-separated list.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateActors {
    pub display_name: String,
    #[serde(default)]
    pub provider_settings: ProviderSettingsMap,
}

/// DTO for updating an existing actor. All fields are optional.
///
/// Renaming keeps the existing `base_filename`; it only changes when set
/// explicitly.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateActor {
    pub display_name: Option<String>,
    pub base_filename: Option<String>,
    pub provider_settings: Option<ProviderSettingsMap>,
    pub complete: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxcat_core::provider::{ContentKind, ProviderSettings, VoiceSettings};

    #[test]
    fn fresh_actor_passes_check() {
        let actor = Actor::new("Alice", "alice", ProviderSettingsMap::new());
        assert!(actor.check().is_ok());
        assert!(!actor.complete);
        assert_eq!(actor.created_at, actor.updated_at);
    }

    #[test]
    fn check_reports_each_bad_field() {
        let mut settings = ProviderSettingsMap::new();
        settings.insert(
            ContentKind::Dialogue,
            ProviderSettings::Custom(VoiceSettings {
                provider: "elevenlabs".into(),
                speed: Some(9.0),
                ..Default::default()
            }),
        );
        let actor = Actor::new("", "Not A Slug", settings);
        match actor.check() {
            Err(CoreError::InvalidFields { entity, fields }) => {
                assert_eq!(entity, "Actor");
                let names: Vec<&str> = fields.iter().map(|f| f.field.as_str()).collect();
                assert_eq!(
                    names,
                    vec![
                        "base_filename",
                        "display_name",
                        "provider_settings.dialogue.speed"
                    ]
                );
            }
            other => panic!("expected InvalidFields, got {other:?}"),
        }
    }

    #[test]
    fn apply_keeps_base_filename_on_rename() {
        let actor = Actor::new("Alice", "alice", ProviderSettingsMap::new());
        let renamed = actor.apply(&UpdateActor {
            display_name: Some("  Alicia ".into()),
            ..Default::default()
        });
        assert_eq!(renamed.display_name, "Alicia");
        assert_eq!(renamed.base_filename, "alice");
        assert_eq!(renamed.id, actor.id);
        assert!(renamed.updated_at >= actor.updated_at);
    }
}
