//! Query parameter types shared by list endpoints.

use serde::Deserialize;
use voxcat_core::types::EntityId;

/// `?owner_id=` filter for sections.
#[derive(Debug, Default, Deserialize)]
pub struct OwnerParams {
    pub owner_id: Option<EntityId>,
}

/// `?section_id=&owner_id=` filters for items.
#[derive(Debug, Default, Deserialize)]
pub struct ItemParams {
    pub section_id: Option<EntityId>,
    pub owner_id: Option<EntityId>,
}
