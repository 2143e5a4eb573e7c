//! Provider settings for generated content.
//!
//! Owners (actors and scenes) carry one [`ProviderSettings`] per
//! [`ContentKind`]. A section carries a single entry for its own kind and
//! defaults to [`ProviderSettings::Inherit`], deferring to its owner.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::error::FieldError;
use crate::validation::field_errors;

/// The kind of content a section holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Dialogue,
    Sfx,
    Music,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dialogue => "dialogue",
            Self::Sfx => "sfx",
            Self::Music => "music",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concrete provider parameters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
pub struct VoiceSettings {
    #[validate(length(min = 1, max = 64))]
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 128))]
    pub voice_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 128))]
    pub model_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub stability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub similarity_boost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub style: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.5, max = 2.0))]
    pub speed: Option<f64>,
}

/// Either defer to the owner (`{"mode": "inherit"}`) or use explicit
/// settings (`{"mode": "custom", "provider": ..., ...}`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ProviderSettings {
    #[default]
    Inherit,
    Custom(VoiceSettings),
}

impl ProviderSettings {
    pub fn is_inherit(&self) -> bool {
        matches!(self, Self::Inherit)
    }

    pub fn as_custom(&self) -> Option<&VoiceSettings> {
        match self {
            Self::Inherit => None,
            Self::Custom(settings) => Some(settings),
        }
    }

    /// Validate the numeric ranges of custom settings. `Inherit` is always valid.
    pub fn validate_settings(&self) -> Result<(), ValidationErrors> {
        match self {
            Self::Inherit => Ok(()),
            Self::Custom(settings) => settings.validate(),
        }
    }
}

/// Per-kind settings map carried by actors and scenes.
pub type ProviderSettingsMap = BTreeMap<ContentKind, ProviderSettings>;

/// Field errors for every invalid entry of an owner's settings map, with
/// paths like `provider_settings.dialogue.stability`.
pub fn settings_map_errors(map: &ProviderSettingsMap) -> Vec<FieldError> {
    map.iter()
        .filter_map(|(kind, settings)| {
            settings
                .validate_settings()
                .err()
                .map(|errors| field_errors(&format!("provider_settings.{kind}"), &errors))
        })
        .flatten()
        .collect()
}

/// Field errors for a single (section-level) settings value.
pub fn settings_errors(settings: &ProviderSettings) -> Vec<FieldError> {
    settings
        .validate_settings()
        .err()
        .map(|errors| field_errors("provider_settings", &errors))
        .unwrap_or_default()
}

/// Resolve the effective settings for a section of `kind`.
///
/// The section's own custom settings win; otherwise the owner's custom entry
/// for the same kind applies. `None` means provider defaults.
pub fn resolve_settings<'a>(
    kind: ContentKind,
    section: &'a ProviderSettings,
    owner: &'a ProviderSettingsMap,
) -> Option<&'a VoiceSettings> {
    section
        .as_custom()
        .or_else(|| owner.get(&kind).and_then(ProviderSettings::as_custom))
}
