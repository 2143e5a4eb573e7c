//! The catalog: every snapshotted collection of one project.

use serde::{Deserialize, Serialize};
use voxcat_core::error::CoreError;
use voxcat_core::labels::breadcrumb;
use voxcat_core::naming::slugify;
use voxcat_core::provider::ProviderSettingsMap;
use voxcat_core::types::EntityId;

use crate::models::actor::Actor;
use crate::models::item::Item;
use crate::models::owner::{OwnerRef, OwnerType};
use crate::models::scene::Scene;
use crate::models::section::Section;

/// Actors, sections, items and scenes of one project, as read in one go.
///
/// Takes are deliberately not part of the catalog: undo/redo never touch them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub actors: Vec<Actor>,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub scenes: Vec<Scene>,
}

impl Catalog {
    pub fn actor(&self, id: EntityId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    pub fn scene(&self, id: EntityId) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == id)
    }

    pub fn section(&self, id: EntityId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn item(&self, id: EntityId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn owner_exists(&self, owner: OwnerRef) -> bool {
        self.owner_name(owner).is_some()
    }

    /// Display name of an actor or scene.
    pub fn owner_name(&self, owner: OwnerRef) -> Option<&str> {
        match owner.owner_type {
            OwnerType::Actor => self.actor(owner.owner_id).map(|a| a.display_name.as_str()),
            OwnerType::Scene => self.scene(owner.owner_id).map(|s| s.name.as_str()),
        }
    }

    /// Filename prefix for content of `owner`.
    pub fn owner_base_filename(&self, owner: OwnerRef) -> Option<String> {
        match owner.owner_type {
            OwnerType::Actor => self.actor(owner.owner_id).map(|a| a.base_filename.clone()),
            OwnerType::Scene => self.scene(owner.owner_id).map(|s| slugify(&s.name)),
        }
    }

    pub fn owner_settings(&self, owner: OwnerRef) -> Option<&ProviderSettingsMap> {
        match owner.owner_type {
            OwnerType::Actor => self.actor(owner.owner_id).map(|a| &a.provider_settings),
            OwnerType::Scene => self.scene(owner.owner_id).map(|s| &s.provider_settings),
        }
    }

    /// Sections owned by `owner`, in stored order.
    pub fn sections_of(&self, owner: OwnerRef) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(move |s| s.owner() == owner)
    }

    /// `Owner / Section`
    pub fn section_label(&self, section: &Section) -> String {
        breadcrumb([
            self.owner_name(section.owner()).unwrap_or_default(),
            section.name.as_str(),
        ])
    }

    /// `Owner / Section / cue` (the section segment is skipped when ungrouped).
    pub fn item_label(&self, item: &Item) -> String {
        let section_name = item
            .section_id
            .and_then(|id| self.section(id))
            .map(|s| s.name.as_str())
            .unwrap_or_default();
        breadcrumb([
            self.owner_name(item.owner()).unwrap_or_default(),
            section_name,
            item.cue_id.as_str(),
        ])
    }

    /// Check the owner exists.
    pub fn require_owner(&self, owner: OwnerRef) -> Result<(), CoreError> {
        if self.owner_exists(owner) {
            Ok(())
        } else {
            Err(CoreError::not_found(
                owner.owner_type.entity(),
                owner.owner_id,
            ))
        }
    }

    /// Check an item of `owner` may be placed in `section_id`: the owner must
    /// exist and the section, when given, must exist and share that owner.
    pub fn check_item_placement(
        &self,
        owner: OwnerRef,
        section_id: Option<EntityId>,
    ) -> Result<(), CoreError> {
        self.require_owner(owner)?;
        let Some(section_id) = section_id else {
            return Ok(());
        };
        let section = self
            .section(section_id)
            .ok_or_else(|| CoreError::not_found("Section", section_id))?;
        if section.owner() != owner {
            return Err(CoreError::Validation(format!(
                "Section {section_id} belongs to a different {}",
                section.owner_type
            )));
        }
        Ok(())
    }
}
