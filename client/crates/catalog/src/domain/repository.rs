//! Gateway Traits
//!
//! Interfaces to the problem endpoints. Implementation is in the
//! infrastructure layer.

use kernel::id::ProblemId;
use platform::TransportResult;

use crate::domain::services::{ProblemPayload, RawProblem, RawProblemPage};
use crate::domain::value_objects::ProblemFilter;

/// Problem catalog gateway trait
#[trait_variant::make(CatalogGateway: Send)]
pub trait LocalCatalogGateway {
    /// One filtered page of problems
    async fn list(&self, filter: &ProblemFilter) -> TransportResult<RawProblemPage>;

    /// A single problem
    async fn get(&self, id: &ProblemId) -> TransportResult<RawProblem>;

    /// Create a problem (admin)
    async fn create(&self, payload: &ProblemPayload) -> TransportResult<RawProblem>;

    /// Update a problem (admin)
    async fn update(&self, id: &ProblemId, payload: &ProblemPayload) -> TransportResult<RawProblem>;

    /// Delete a problem (admin)
    async fn delete(&self, id: &ProblemId) -> TransportResult<()>;
}
