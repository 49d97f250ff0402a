//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of client vocabulary:
//! - Common error types and result aliases
//! - Client-side validation errors
//! - String-typed entity IDs
//! - The request lifecycle shared by every store
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all stores.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
    pub mod validation;
}
pub mod id;
pub mod lifecycle;
