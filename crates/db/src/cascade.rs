//! Cascade deletes.
//!
//! Removing an owner removes its sections, then every item in those sections
//! or owned directly, then every take of those items. Removing a section
//! removes its items and their takes; removing an item removes its takes.
//!
//! A plan is computed from a catalog read first, so the caller can save the
//! pre-delete snapshot before anything is written.

use std::collections::HashSet;

use serde::Serialize;
use voxcat_core::types::EntityId;

use crate::models::catalog::Catalog;
use crate::models::owner::{OwnerRef, OwnerType};
use crate::repositories::{ActorRepo, ItemRepo, SceneRepo, SectionRepo, TakeRepo};
use crate::{ProjectContext, StoreError};

/// Ids to remove, computed from the catalog before any write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadePlan {
    pub owner: Option<OwnerRef>,
    pub section_ids: HashSet<EntityId>,
    pub item_ids: HashSet<EntityId>,
}

/// Counts of removed records per collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CascadeReport {
    pub owners: usize,
    pub sections: usize,
    pub items: usize,
    pub takes: usize,
}

impl CascadePlan {
    pub fn for_owner(catalog: &Catalog, owner: OwnerRef) -> Self {
        let section_ids: HashSet<EntityId> = catalog.sections_of(owner).map(|s| s.id).collect();
        let item_ids = catalog
            .items
            .iter()
            .filter(|i| {
                i.owner() == owner || i.section_id.is_some_and(|s| section_ids.contains(&s))
            })
            .map(|i| i.id)
            .collect();
        Self {
            owner: Some(owner),
            section_ids,
            item_ids,
        }
    }

    pub fn for_section(catalog: &Catalog, section_id: EntityId) -> Self {
        let item_ids = catalog
            .items
            .iter()
            .filter(|i| i.section_id == Some(section_id))
            .map(|i| i.id)
            .collect();
        Self {
            owner: None,
            section_ids: HashSet::from([section_id]),
            item_ids,
        }
    }

    pub fn for_item(item_id: EntityId) -> Self {
        Self {
            owner: None,
            section_ids: HashSet::new(),
            item_ids: HashSet::from([item_id]),
        }
    }

    /// Apply the plan: owner, then sections, then items, then takes.
    pub async fn commit(&self, ctx: &ProjectContext) -> Result<CascadeReport, StoreError> {
        let mut report = CascadeReport::default();

        if let Some(owner) = self.owner {
            let removed = match owner.owner_type {
                OwnerType::Actor => ActorRepo::delete(ctx, owner.owner_id).await?,
                OwnerType::Scene => SceneRepo::delete(ctx, owner.owner_id).await?,
            };
            report.owners = usize::from(removed);
        }
        if !self.section_ids.is_empty() {
            report.sections = SectionRepo::delete_many(ctx, &self.section_ids).await?.len();
        }
        if !self.item_ids.is_empty() {
            report.items = ItemRepo::delete_many(ctx, &self.item_ids).await?.len();
            report.takes = TakeRepo::delete_by_items(ctx, &self.item_ids).await?.len();
        }

        tracing::debug!(
            project = ctx.name(),
            owners = report.owners,
            sections = report.sections,
            items = report.items,
            takes = report.takes,
            "Cascade delete committed"
        );
        Ok(report)
    }
}
