//! Repository for `items.json`.

use std::collections::HashSet;

use voxcat_core::types::EntityId;

use crate::collection;
use crate::models::item::Item;
use crate::{ProjectContext, StoreError};

/// Optional filters for [`ItemRepo::list_filtered`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemFilter {
    pub owner_id: Option<EntityId>,
    pub section_id: Option<EntityId>,
}

/// Provides CRUD operations for content items.
pub struct ItemRepo;

impl ItemRepo {
    pub async fn list(ctx: &ProjectContext) -> Result<Vec<Item>, StoreError> {
        collection::load_or_empty(ctx).await
    }

    pub async fn list_filtered(
        ctx: &ProjectContext,
        filter: ItemFilter,
    ) -> Result<Vec<Item>, StoreError> {
        let mut items = Self::list(ctx).await?;
        items.retain(|i| {
            filter.owner_id.map_or(true, |o| i.owner_id == o)
                && filter.section_id.map_or(true, |s| i.section_id == Some(s))
        });
        Ok(items)
    }

    pub async fn find_by_id(
        ctx: &ProjectContext,
        id: EntityId,
    ) -> Result<Option<Item>, StoreError> {
        collection::find(ctx, id).await
    }

    pub async fn insert_many(ctx: &ProjectContext, items: &[Item]) -> Result<(), StoreError> {
        collection::append(ctx, items).await
    }

    pub async fn update(ctx: &ProjectContext, item: &Item) -> Result<bool, StoreError> {
        collection::replace(ctx, item).await
    }

    /// Remove every item whose id is in `ids`, returning the removed ones.
    pub async fn delete_many(
        ctx: &ProjectContext,
        ids: &HashSet<EntityId>,
    ) -> Result<Vec<Item>, StoreError> {
        collection::remove_where::<Item, _>(ctx, |i| ids.contains(&i.id)).await
    }
}
