//! Repository for `sections.json`.

use std::collections::HashSet;

use voxcat_core::types::EntityId;

use crate::collection;
use crate::models::owner::OwnerRef;
use crate::models::section::Section;
use crate::{ProjectContext, StoreError};

/// Provides CRUD operations for sections.
pub struct SectionRepo;

impl SectionRepo {
    pub async fn list(ctx: &ProjectContext) -> Result<Vec<Section>, StoreError> {
        collection::load_or_empty(ctx).await
    }

    /// Sections owned by `owner`, in stored order.
    pub async fn list_by_owner(
        ctx: &ProjectContext,
        owner: OwnerRef,
    ) -> Result<Vec<Section>, StoreError> {
        let mut sections = Self::list(ctx).await?;
        sections.retain(|s| s.owner() == owner);
        Ok(sections)
    }

    pub async fn find_by_id(
        ctx: &ProjectContext,
        id: EntityId,
    ) -> Result<Option<Section>, StoreError> {
        collection::find(ctx, id).await
    }

    pub async fn insert_many(
        ctx: &ProjectContext,
        sections: &[Section],
    ) -> Result<(), StoreError> {
        collection::append(ctx, sections).await
    }

    pub async fn update(ctx: &ProjectContext, section: &Section) -> Result<bool, StoreError> {
        collection::replace(ctx, section).await
    }

    /// Remove every section whose id is in `ids`, returning the removed ones.
    pub async fn delete_many(
        ctx: &ProjectContext,
        ids: &HashSet<EntityId>,
    ) -> Result<Vec<Section>, StoreError> {
        collection::remove_where::<Section, _>(ctx, |s| ids.contains(&s.id)).await
    }
}
