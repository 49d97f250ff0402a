//! Application Layer - Catalog Store
//!
//! The store and its operations, one file per operation group.

pub mod fetch;
pub mod filters;
pub mod manage;
pub mod store;

pub use store::{CatalogState, CatalogStore};
