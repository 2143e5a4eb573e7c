//! Re-inserting a previously deleted actor or scene with its sections and
//! items.
//!
//! Restore writes straight to the collections and does not touch the undo or
//! redo stacks.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use voxcat_core::error::CoreError;
use voxcat_core::types::EntityId;

use crate::models::actor::Actor;
use crate::models::catalog::Catalog;
use crate::models::item::Item;
use crate::models::owner::{OwnerRef, OwnerType};
use crate::models::scene::Scene;
use crate::models::section::Section;
use crate::models::take;
use crate::repositories::{ActorRepo, ItemRepo, SceneRepo, SectionRepo, TakeRepo};
use crate::{ProjectContext, StoreError};

/// Request body of a restore: exactly one owner plus its records.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestoreBundle {
    pub actor: Option<Actor>,
    pub scene: Option<Scene>,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RestoredOwner {
    Actor(Actor),
    Scene(Scene),
}

impl RestoredOwner {
    pub fn owner_ref(&self) -> OwnerRef {
        match self {
            Self::Actor(a) => OwnerRef::actor(a.id),
            Self::Scene(s) => OwnerRef::scene(s.id),
        }
    }
}

/// Validated records to insert, with records already present filtered out.
#[derive(Debug, Clone, PartialEq)]
pub struct RestorePlan {
    pub owner: RestoredOwner,
    pub sections: Vec<Section>,
    pub items: Vec<Item>,
    pub sections_skipped: usize,
    pub items_skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestoreReport {
    pub owner_type: OwnerType,
    pub owner_id: EntityId,
    pub sections_restored: usize,
    pub items_restored: usize,
    pub sections_skipped: usize,
    pub items_skipped: usize,
}

impl RestoreBundle {
    /// Check the bundle against the current catalog.
    ///
    /// Fails with `Conflict` when the owner still exists, and with a
    /// validation error when a section or item does not belong to the owner
    /// or an item points at an unknown section.
    pub fn plan(self, catalog: &Catalog) -> Result<RestorePlan, CoreError> {
        let owner = match (self.actor, self.scene) {
            (Some(actor), None) => {
                actor.check()?;
                RestoredOwner::Actor(actor)
            }
            (None, Some(scene)) => {
                scene.check()?;
                RestoredOwner::Scene(scene)
            }
            _ => {
                return Err(CoreError::Validation(
                    "Exactly one of actor or scene is required".to_string(),
                ))
            }
        };
        let owner_ref = owner.owner_ref();
        if catalog.owner_exists(owner_ref) {
            return Err(CoreError::Conflict(format!(
                "{} {} already exists",
                owner_ref.owner_type.entity(),
                owner_ref.owner_id
            )));
        }

        let mut known_sections: HashSet<EntityId> =
            catalog.sections_of(owner_ref).map(|s| s.id).collect();
        let mut sections = Vec::new();
        let mut sections_skipped = 0;
        for section in self.sections {
            if section.owner() != owner_ref {
                return Err(CoreError::Validation(format!(
                    "Section {} does not belong to the restored {}",
                    section.id, owner_ref.owner_type
                )));
            }
            section.check()?;
            known_sections.insert(section.id);
            if catalog.section(section.id).is_some() {
                sections_skipped += 1;
            } else {
                sections.push(section);
            }
        }

        let mut items = Vec::new();
        let mut items_skipped = 0;
        for item in self.items {
            if item.owner() != owner_ref {
                return Err(CoreError::Validation(format!(
                    "Item {} does not belong to the restored {}",
                    item.id, owner_ref.owner_type
                )));
            }
            if let Some(section_id) = item.section_id {
                if !known_sections.contains(&section_id) {
                    return Err(CoreError::Validation(format!(
                        "Item {} references unknown section {section_id}",
                        item.id
                    )));
                }
            }
            item.check()?;
            if catalog.item(item.id).is_some() {
                items_skipped += 1;
            } else {
                items.push(item);
            }
        }

        Ok(RestorePlan {
            owner,
            sections,
            items,
            sections_skipped,
            items_skipped,
        })
    }
}

impl RestorePlan {
    /// Write the owner, then sections, then items.
    ///
    /// Each item's approval flag is recomputed from whatever takes remain
    /// for it.
    pub async fn commit(mut self, ctx: &ProjectContext) -> Result<RestoreReport, StoreError> {
        let owner_ref = self.owner.owner_ref();
        match &self.owner {
            RestoredOwner::Actor(actor) => {
                ActorRepo::insert_many(ctx, std::slice::from_ref(actor)).await?
            }
            RestoredOwner::Scene(scene) => {
                SceneRepo::insert_many(ctx, std::slice::from_ref(scene)).await?
            }
        }
        if !self.sections.is_empty() {
            SectionRepo::insert_many(ctx, &self.sections).await?;
        }
        if !self.items.is_empty() {
            let takes = TakeRepo::list(ctx).await?;
            for item in &mut self.items {
                let own: Vec<_> = takes
                    .iter()
                    .filter(|t| t.item_id == item.id)
                    .cloned()
                    .collect();
                item.all_approved = take::all_approved(&own);
            }
            ItemRepo::insert_many(ctx, &self.items).await?;
        }

        tracing::info!(
            project = ctx.name(),
            owner_type = %owner_ref.owner_type,
            owner_id = %owner_ref.owner_id,
            sections = self.sections.len(),
            items = self.items.len(),
            "Restored deleted owner"
        );

        Ok(RestoreReport {
            owner_type: owner_ref.owner_type,
            owner_id: owner_ref.owner_id,
            sections_restored: self.sections.len(),
            items_restored: self.items.len(),
            sections_skipped: self.sections_skipped,
            items_skipped: self.items_skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxcat_core::provider::{ContentKind, ProviderSettings, ProviderSettingsMap};

    fn bundle() -> (RestoreBundle, Actor, Section, Item) {
        let actor = Actor::new("Alice", "alice", ProviderSettingsMap::new());
        let owner = OwnerRef::actor(actor.id);
        let section = Section::new(owner, ContentKind::Dialogue, "Barks", ProviderSettings::Inherit);
        let item = Item::new(owner, Some(section.id), "cue_01", "", "alice_cue_01");
        let bundle = RestoreBundle {
            actor: Some(actor.clone()),
            scene: None,
            sections: vec![section.clone()],
            items: vec![item.clone()],
        };
        (bundle, actor, section, item)
    }

    #[test]
    fn requires_exactly_one_owner() {
        let err = RestoreBundle::default().plan(&Catalog::default()).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let (mut both, ..) = bundle();
        both.scene = Some(Scene::new("Forest", None, ProviderSettingsMap::new()));
        assert!(matches!(
            both.plan(&Catalog::default()),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn existing_owner_conflicts() {
        let (bundle, actor, ..) = bundle();
        let catalog = Catalog {
            actors: vec![actor],
            ..Default::default()
        };
        assert!(matches!(bundle.plan(&catalog), Err(CoreError::Conflict(_))));
    }

    #[test]
    fn existing_records_are_skipped() {
        let (bundle, _actor, section, item) = bundle();
        let catalog = Catalog {
            sections: vec![section],
            ..Default::default()
        };
        let plan = bundle.plan(&catalog).unwrap();
        assert_eq!(plan.sections_skipped, 1);
        assert!(plan.sections.is_empty());
        assert_eq!(plan.items, vec![item]);
    }

    #[test]
    fn foreign_records_are_rejected() {
        let (mut bundle, ..) = bundle();
        let stranger = OwnerRef::actor(voxcat_core::types::new_id());
        bundle
            .items
            .push(Item::new(stranger, None, "cue_02", "", "bob_cue_02"));
        assert!(matches!(
            bundle.plan(&Catalog::default()),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn item_section_must_be_known() {
        let (mut bundle, ..) = bundle();
        bundle.sections.clear();
        assert!(matches!(
            bundle.plan(&Catalog::default()),
            Err(CoreError::Validation(_))
        ));
    }
}
