//! Domain logic for the voxcat production catalog.
//!
//! Everything in this crate is pure: no file or network I/O. The store
//! (`voxcat-db`) and the HTTP service (`voxcat-api`) build on these types.

pub mod diff;
pub mod error;
pub mod history;
pub mod labels;
pub mod naming;
pub mod provider;
pub mod types;
pub mod validation;
