//! Scene entity model and DTOs.
//!
//! Scenes own sections and items the same way actors do.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;
use voxcat_core::error::CoreError;
use voxcat_core::provider::{settings_map_errors, ProviderSettingsMap};
use voxcat_core::types::{new_id, EntityId, Timestamp};
use voxcat_core::validation::{collect_field_errors, field_errors};

use crate::collection::Record;

/// A record from `scenes.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Scene {
    pub id: EntityId,
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[serde(default)]
    pub provider_settings: ProviderSettingsMap,
    #[serde(default)]
    pub complete: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Record for Scene {
    const FILE: &'static str = "scenes.json";
    const ENTITY: &'static str = "Scene";

    fn id(&self) -> EntityId {
        self.id
    }
}

impl Scene {
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        provider_settings: ProviderSettingsMap,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            name: name.into(),
            description,
            provider_settings,
            complete: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn check(&self) -> Result<(), CoreError> {
        let mut fields = self
            .validate()
            .err()
            .map(|e| field_errors("", &e))
            .unwrap_or_default();
        fields.extend(settings_map_errors(&self.provider_settings));
        collect_field_errors(Self::ENTITY, fields)
    }

    pub fn apply(&self, input: &UpdateScene) -> Self {
        let mut next = self.clone();
        if let Some(name) = &input.name {
            next.name = name.trim().to_string();
        }
        if let Some(description) = &input.description {
            next.description = description.clone();
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

/// DTO for creating scenes. `name` may hold a comma-separated list.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScenes {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub provider_settings: ProviderSettingsMap,
}

/// DTO for updating an existing scene. All fields are optional; an explicit
/// `"description": null` clears the description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateScene {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub description: Option<Option<String>>,
    pub provider_settings: Option<ProviderSettingsMap>,
    pub complete: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_null_clears() {
        let input: UpdateScene = serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(input.description, Some(None));

        let input: UpdateScene = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(input.description, None);

        let scene = Scene::new("Forest", Some("night".into()), ProviderSettingsMap::new());
        let cleared = scene.apply(&UpdateScene {
            description: Some(None),
            ..Default::default()
        });
        assert_eq!(cleared.description, None);
        assert_eq!(cleared.name, "Forest");
    }

    #[test]
    fn empty_name_fails_check() {
        let scene = Scene::new("", None, ProviderSettingsMap::new());
        assert!(matches!(
            scene.check(),
            Err(CoreError::InvalidFields { entity: "Scene", .. })
        ));
    }
}
