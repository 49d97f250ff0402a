//! Domain Layer - Problem shapes and their translation
//!
//! This layer contains:
//! - Domain entities (Problem, ProblemDraft, ProblemPatch)
//! - Domain value objects (ProblemType, Difficulty, ProblemFilter)
//! - Domain services (normalization in both directions)
//! - Gateway traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
