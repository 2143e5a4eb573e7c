//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `Serialize` + `Deserialize` entity struct matching the stored record
//! - A `Deserialize` create DTO
//! - A `Deserialize` update DTO (all `Option` fields) for patches

use serde::{Deserialize, Deserializer};

pub mod actor;
pub mod catalog;
pub mod item;
pub mod owner;
pub mod scene;
pub mod section;
pub mod snapshot;
pub mod take;

/// Distinguish an absent field (`None`) from an explicit `null`
/// (`Some(None)`) in update DTOs. Use with `#[serde(default)]`.
pub(crate) fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
