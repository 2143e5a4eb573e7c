//! Whole-catalog reads and writes.

use crate::collection::{self, Record};
use crate::models::actor::Actor;
use crate::models::catalog::Catalog;
use crate::models::item::Item;
use crate::models::scene::Scene;
use crate::models::section::Section;
use crate::{ProjectContext, StoreError};

/// Loads and restores the four snapshotted collections together.
pub struct CatalogRepo;

impl CatalogRepo {
    /// Read every collection of the project concurrently.
    ///
    /// Never fails: a collection that cannot be read (missing, unreadable or
    /// malformed) comes back empty, so a missing `scenes.json` does not hide
    /// the actors.
    pub async fn read(ctx: &ProjectContext) -> Catalog {
        let (actors, sections, items, scenes) = tokio::join!(
            collection::load::<Actor>(ctx),
            collection::load::<Section>(ctx),
            collection::load::<Item>(ctx),
            collection::load::<Scene>(ctx),
        );

        Catalog {
            actors: or_empty::<Actor>(ctx, actors),
            sections: or_empty::<Section>(ctx, sections),
            items: or_empty::<Item>(ctx, items),
            scenes: or_empty::<Scene>(ctx, scenes),
        }
    }

    /// Overwrite every collection with the contents of `catalog`.
    ///
    /// Each file is replaced atomically, but the four writes are independent:
    /// a failure part-way leaves the earlier collections already rewritten.
    pub async fn overwrite(ctx: &ProjectContext, catalog: &Catalog) -> Result<(), StoreError> {
        collection::save_all(ctx, &catalog.actors).await?;
        collection::save_all(ctx, &catalog.sections).await?;
        collection::save_all(ctx, &catalog.items).await?;
        collection::save_all(ctx, &catalog.scenes).await?;
        Ok(())
    }
}

fn or_empty<T: Record>(ctx: &ProjectContext, result: Result<Vec<T>, StoreError>) -> Vec<T> {
    match result {
        Ok(records) => records,
        Err(e) if e.is_not_found() => {
            tracing::debug!(
                project = ctx.name(),
                collection = T::FILE,
                "Collection absent, reading as empty"
            );
            Vec::new()
        }
        Err(e) => {
            tracing::warn!(
                project = ctx.name(),
                collection = T::FILE,
                error = %e,
                "Collection unreadable, reading as empty"
            );
            Vec::new()
        }
    }
}
