//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that take
//! the [`ProjectContext`](crate::ProjectContext) as their first argument.

pub mod actor_repo;
pub mod catalog_repo;
pub mod item_repo;
pub mod scene_repo;
pub mod section_repo;
pub mod snapshot_repo;
pub mod take_repo;

pub use actor_repo::ActorRepo;
pub use catalog_repo::CatalogRepo;
pub use item_repo::{ItemFilter, ItemRepo};
pub use scene_repo::SceneRepo;
pub use section_repo::SectionRepo;
pub use snapshot_repo::SnapshotRepo;
pub use take_repo::TakeRepo;
