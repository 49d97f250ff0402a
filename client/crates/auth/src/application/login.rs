//! Login
//!
//! Exchanges credentials for a token. Identity is not resolved here;
//! callers that need it follow up with `refresh_identity`.

use crate::application::store::SessionStore;
use crate::domain::entity::session::{Session, SessionLifecycle};
use crate::domain::repository::AuthGateway;
use crate::domain::value_object::credentials::Credentials;
use crate::error::{SessionError, SessionResult};

impl<G> SessionStore<G>
where
    G: AuthGateway + Sync,
{
    #[tracing::instrument(name = "session.login", skip_all, fields(username = %username))]
    pub async fn login(&self, username: &str, password: &str) -> SessionResult<Session> {
        let credentials = Credentials::new(username, password);
        credentials.validate()?;

        self.state.send_modify(|state| {
            state.lifecycle = SessionLifecycle::Loading;
            state.last_error = None;
            state.login.begin();
        });

        match self.gateway.login(&credentials).await {
            Ok(token) => {
                self.vault.store(token.access_token);
                self.identity_sequence.abandon();
                self.state.send_modify(|state| {
                    // A new credential may belong to someone else.
                    state.identity = None;
                    state.identity_request.reset();
                    state.lifecycle = SessionLifecycle::Ready;
                    state.login.succeed();
                });
                tracing::info!("Logged in");
                Ok(self.snapshot())
            }
            Err(err) => {
                let message = err.message();
                self.state.send_modify(|state| {
                    state.lifecycle = SessionLifecycle::Failed;
                    state.last_error = Some(message.clone());
                    state.login.fail(message);
                });
                let err = SessionError::from(err);
                err.log();
                Err(err)
            }
        }
    }
}
