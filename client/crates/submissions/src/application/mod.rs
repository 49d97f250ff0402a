//! Application Layer - Submission Store
//!
//! The store and its operations, one file per operation group.

pub mod apply;
pub mod create;
pub mod fetch;
pub mod store;
pub mod verdict;

pub use apply::Applied;
pub use store::{SubmissionState, SubmissionStore};
