//! Repository for `scenes.json`.

use voxcat_core::types::EntityId;

use crate::collection;
use crate::models::scene::Scene;
use crate::{ProjectContext, StoreError};

/// Provides CRUD operations for scenes.
pub struct SceneRepo;

impl SceneRepo {
    pub async fn list(ctx: &ProjectContext) -> Result<Vec<Scene>, StoreError> {
        collection::load_or_empty(ctx).await
    }

    pub async fn find_by_id(
        ctx: &ProjectContext,
        id: EntityId,
    ) -> Result<Option<Scene>, StoreError> {
        collection::find(ctx, id).await
    }

    pub async fn insert_many(ctx: &ProjectContext, scenes: &[Scene]) -> Result<(), StoreError> {
        collection::append(ctx, scenes).await
    }

    pub async fn update(ctx: &ProjectContext, scene: &Scene) -> Result<bool, StoreError> {
        collection::replace(ctx, scene).await
    }

    /// Remove one scene. Does not cascade; see [`crate::cascade`].
    pub async fn delete(ctx: &ProjectContext, id: EntityId) -> Result<bool, StoreError> {
        let removed = collection::remove_where::<Scene, _>(ctx, |s| s.id == id).await?;
        Ok(!removed.is_empty())
    }
}
