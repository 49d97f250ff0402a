//! Gateway Traits
//!
//! Interfaces to the submission endpoints. Implementation is in the
//! infrastructure layer.

use kernel::id::SubmissionId;
use platform::TransportResult;

use crate::domain::services::{RawSubmission, SubmissionPayload};

/// Submission gateway trait
#[trait_variant::make(SubmissionGateway: Send)]
pub trait LocalSubmissionGateway {
    /// The caller's submissions, newest first
    async fn list_mine(&self) -> TransportResult<Vec<RawSubmission>>;

    /// A single submission
    async fn get(&self, id: &SubmissionId) -> TransportResult<RawSubmission>;

    /// Submit a solution; the server assigns id and initial status
    async fn create(&self, payload: &SubmissionPayload) -> TransportResult<RawSubmission>;
}
