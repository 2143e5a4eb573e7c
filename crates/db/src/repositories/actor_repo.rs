//! Repository for `actors.json`.

use voxcat_core::types::EntityId;

use crate::collection;
use crate::models::actor::Actor;
use crate::{ProjectContext, StoreError};

/// Provides CRUD operations for actors.
pub struct ActorRepo;

impl ActorRepo {
    /// All actors in stored (creation) order.
    pub async fn list(ctx: &ProjectContext) -> Result<Vec<Actor>, StoreError> {
        collection::load_or_empty(ctx).await
    }

    pub async fn find_by_id(
        ctx: &ProjectContext,
        id: EntityId,
    ) -> Result<Option<Actor>, StoreError> {
        collection::find(ctx, id).await
    }

    /// Append new actors.
    pub async fn insert_many(ctx: &ProjectContext, actors: &[Actor]) -> Result<(), StoreError> {
        collection::append(ctx, actors).await
    }

    /// Replace the stored actor with the same id. Returns `false` if absent.
    pub async fn update(ctx: &ProjectContext, actor: &Actor) -> Result<bool, StoreError> {
        collection::replace(ctx, actor).await
    }

    /// Remove one actor. Does not cascade; see [`crate::cascade`].
    pub async fn delete(ctx: &ProjectContext, id: EntityId) -> Result<bool, StoreError> {
        let removed = collection::remove_where::<Actor, _>(ctx, |a| a.id == id).await?;
        Ok(!removed.is_empty())
    }
}
