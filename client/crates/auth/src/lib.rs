//! Auth (Session) Client Module
//!
//! Clean Architecture structure:
//! - `domain/` - Session and identity entities, credentials, gateway trait
//! - `application/` - Session store operations and the access guard
//! - `infra/` - HTTP gateway over the platform Transport
//!
//! ## Session Model
//! - The bearer token lives in the shared `platform::TokenVault`
//! - Identity is resolved separately and never persisted
//! - A rejected identity refresh clears the whole session
//! - Role checks go through [`can_enter`] only

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;


// Re-exports for convenience
pub use application::{
    Access, AccessWatch, DenyReason, RouteRequirement, SessionState, SessionStore, can_enter,
    watch_access,
};
pub use domain::entity::identity::{Identity, RawIdentity};
pub use domain::entity::session::{Session, SessionLifecycle};
pub use domain::value_object::credentials::{Credentials, RegisterProfile};
pub use domain::value_object::user_role::UserRole;
pub use error::{SessionError, SessionResult};
pub use infra::http::HttpAuthGateway;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
