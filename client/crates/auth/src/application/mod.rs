//! Application Layer
//!
//! The session store and its operations.

pub mod guard;
pub mod login;
pub mod logout;
pub mod refresh_identity;
pub mod register;
pub mod store;

// Re-exports
pub use guard::{Access, AccessWatch, DenyReason, RouteRequirement, can_enter, watch_access};
pub use store::{SessionState, SessionStore};
