//! Gateway Traits
//!
//! Interfaces to the authentication endpoints. Implementation is in the
//! infrastructure layer.

use platform::TransportResult;
use serde::Deserialize;

use crate::domain::entity::identity::RawIdentity;
use crate::domain::value_object::credentials::{Credentials, RegisterProfile};

/// Body of a successful `POST /auth/login`
#[derive(Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("token_type", &self.token_type)
            .finish_non_exhaustive()
    }
}

/// Authentication gateway trait
#[trait_variant::make(AuthGateway: Send)]
pub trait LocalAuthGateway {
    /// Exchange credentials for a bearer token
    async fn login(&self, credentials: &Credentials) -> TransportResult<AccessToken>;

    /// Create an account; does not sign in
    async fn register(&self, profile: &RegisterProfile) -> TransportResult<RawIdentity>;

    /// Identity behind the currently attached token
    async fn current_user(&self) -> TransportResult<RawIdentity>;
}
