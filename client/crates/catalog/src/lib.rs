//! Catalog (Problem) Client Module
//!
//! Clean Architecture structure:
//! - `domain/` - Problem entities, enums, filter, normalizer, gateway trait
//! - `application/` - Catalog store operations
//! - `infra/` - HTTP gateway over the platform Transport
//!
//! ## Consistency Model
//! - Backend records are normalized by a total function; bad fields degrade
//! - Each fetch replaces its slice wholesale, in server order
//! - Only the most recently issued fetch of an operation may write state
//! - A failed fetch keeps the previously loaded list

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::{CatalogState, CatalogStore};
pub use domain::entities::{Problem, ProblemDraft, ProblemPage, ProblemPatch};
pub use domain::services::{ProblemPayload, RawProblem, denormalize, normalize};
pub use domain::value_objects::{Difficulty, ProblemFilter, ProblemType};
pub use error::{CatalogError, CatalogResult};
pub use infra::http::HttpCatalogGateway;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[cfg(test)]
mod tests;
