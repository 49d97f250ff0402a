//! HTTP Authentication Gateway

use std::sync::Arc;

use http::Method;
use platform::{HttpBackend, RequestBody, RequestOptions, Transport, TransportResult};

use crate::domain::entity::identity::RawIdentity;
use crate::domain::repository::{AccessToken, AuthGateway};
use crate::domain::value_object::credentials::{Credentials, RegisterProfile};

/// [`AuthGateway`] over the shared [`Transport`]
pub struct HttpAuthGateway<B> {
    transport: Arc<Transport<B>>,
}

impl<B> HttpAuthGateway<B> {
    pub fn new(transport: Arc<Transport<B>>) -> Self {
        Self { transport }
    }
}

impl<B> AuthGateway for HttpAuthGateway<B>
where
    B: HttpBackend + Sync,
{
    async fn login(&self, credentials: &Credentials) -> TransportResult<AccessToken> {
        self.transport
            .request(
                Method::POST,
                "/auth/login",
                RequestBody::Form(credentials.form_fields()),
                RequestOptions::login(),
            )
            .await
    }

    async fn register(&self, profile: &RegisterProfile) -> TransportResult<RawIdentity> {
        self.transport.post("/auth/register", profile).await
    }

    async fn current_user(&self) -> TransportResult<RawIdentity> {
        self.transport.get("/users/me", Vec::new()).await
    }
}
