//! Refresh Identity
//!
//! Resolves the identity behind the stored token. Any rejection means the
//! credential cannot be trusted: the whole session is cleared and no error
//! banner is left behind.

use platform::TransportError;

use crate::application::store::SessionStore;
use crate::domain::entity::identity::Identity;
use crate::domain::entity::session::SessionLifecycle;
use crate::domain::repository::AuthGateway;
use crate::error::{SessionError, SessionResult};

impl<G> SessionStore<G>
where
    G: AuthGateway + Sync,
{
    #[tracing::instrument(name = "session.refresh_identity", skip_all)]
    pub async fn refresh_identity(&self) -> SessionResult<Identity> {
        let Some(token) = self.vault.token() else {
            return Err(SessionError::NotAuthenticated);
        };

        let ticket = self.identity_sequence.issue();
        self.state.send_modify(|state| {
            state.lifecycle = SessionLifecycle::Loading;
            state.identity_request.begin();
        });

        let result = self.gateway.current_user().await;

        // Login, logout or a newer refresh happened meanwhile.
        if !self.identity_sequence.is_current(ticket) {
            tracing::debug!(%ticket, "Discarding superseded identity response");
            return Err(SessionError::Superseded);
        }

        match result {
            Ok(raw) if self.vault.token().as_deref() == Some(token.as_str()) => {
                let identity = Identity::from(raw);
                self.state.send_modify(|state| {
                    state.identity = Some(identity.clone());
                    state.lifecycle = SessionLifecycle::Ready;
                    state.last_error = None;
                    state.identity_request.succeed();
                });
                tracing::info!(user_id = %identity.id, "Identity resolved");
                Ok(identity)
            }
            // Another request had the token rejected while this one was in flight.
            Ok(_) => Err(self.reject_identity(TransportError::SessionInvalidated {
                message: "Session expired".to_string(),
            })),
            Err(err) => Err(self.reject_identity(err)),
        }
    }

    fn reject_identity(&self, err: TransportError) -> SessionError {
        self.vault.invalidate();
        self.state.send_modify(|state| {
            state.identity = None;
            state.lifecycle = SessionLifecycle::Failed;
            state.last_error = None;
            state.identity_request.fail(err.message());
        });
        tracing::info!("Identity refresh rejected, session cleared");
        let err = SessionError::from(err);
        err.log();
        err
    }
}
