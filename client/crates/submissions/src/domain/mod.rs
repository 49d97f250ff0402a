//! Domain Layer - Submission shapes and their lifecycle
//!
//! This layer contains:
//! - Domain entities (Submission, SubmissionDraft)
//! - Domain value objects (SubmissionStatus and its state machine)
//! - Domain services (normalization of server records)
//! - Gateway traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
