//! Repository for `takes.json`.
//!
//! Takes are written directly and never snapshotted.

use std::collections::HashSet;

use voxcat_core::types::EntityId;

use crate::collection;
use crate::models::take::Take;
use crate::{ProjectContext, StoreError};

/// Provides CRUD operations for takes.
pub struct TakeRepo;

impl TakeRepo {
    pub async fn list(ctx: &ProjectContext) -> Result<Vec<Take>, StoreError> {
        collection::load_or_empty(ctx).await
    }

    /// Takes of one item, oldest first.
    pub async fn list_by_item(
        ctx: &ProjectContext,
        item_id: EntityId,
    ) -> Result<Vec<Take>, StoreError> {
        let mut takes = Self::list(ctx).await?;
        takes.retain(|t| t.item_id == item_id);
        Ok(takes)
    }

    pub async fn find_by_id(
        ctx: &ProjectContext,
        id: EntityId,
    ) -> Result<Option<Take>, StoreError> {
        collection::find(ctx, id).await
    }

    pub async fn create(ctx: &ProjectContext, take: &Take) -> Result<(), StoreError> {
        collection::append(ctx, std::slice::from_ref(take)).await
    }

    pub async fn update(ctx: &ProjectContext, take: &Take) -> Result<bool, StoreError> {
        collection::replace(ctx, take).await
    }

    pub async fn delete(ctx: &ProjectContext, id: EntityId) -> Result<Option<Take>, StoreError> {
        let removed = collection::remove_where::<Take, _>(ctx, |t| t.id == id).await?;
        Ok(removed.into_iter().next())
    }

    /// Remove every take belonging to one of `item_ids`.
    pub async fn delete_by_items(
        ctx: &ProjectContext,
        item_ids: &HashSet<EntityId>,
    ) -> Result<Vec<Take>, StoreError> {
        collection::remove_where::<Take, _>(ctx, |t| item_ids.contains(&t.item_id)).await
    }
}
