//! Submission Client Module
//!
//! Clean Architecture structure:
//! - `domain/` - Submission entity, status machine, normalizer, gateway trait
//! - `application/` - Submission store operations
//! - `infra/` - HTTP gateway over the platform Transport
//!
//! ## Consistency Model
//! - A submission enters the store only after the server acknowledges it
//! - Records merge by id; known ids are replaced wholesale
//! - Terminal statuses are sticky; stale updates are dropped silently
//! - Only the most recently issued fetch of an operation may write state

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::{Applied, SubmissionState, SubmissionStore};
pub use domain::entities::{Submission, SubmissionDraft};
pub use domain::services::{RawSubmission, SubmissionPayload, normalize};
pub use domain::value_objects::SubmissionStatus;
pub use error::{SubmissionError, SubmissionResult};
pub use infra::http::HttpSubmissionGateway;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
