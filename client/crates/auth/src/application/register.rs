//! Register
//!
//! Pure account creation: the new account is not signed in, and the
//! session lifecycle and token stay as they were.

use crate::application::store::SessionStore;
use crate::domain::entity::identity::Identity;
use crate::domain::repository::AuthGateway;
use crate::domain::value_object::credentials::RegisterProfile;
use crate::error::{SessionError, SessionResult};

impl<G> SessionStore<G>
where
    G: AuthGateway + Sync,
{
    #[tracing::instrument(
        name = "session.register",
        skip_all,
        fields(username = %profile.username)
    )]
    pub async fn register(&self, profile: &RegisterProfile) -> SessionResult<Identity> {
        profile.validate()?;

        self.state.send_modify(|state| {
            state.last_error = None;
            state.register.begin();
        });

        match self.gateway.register(profile).await {
            Ok(raw) => {
                let identity = Identity::from(raw);
                self.state.send_modify(|state| {
                    state.register.succeed();
                });
                tracing::info!(user_id = %identity.id, "Account registered");
                Ok(identity)
            }
            Err(err) => {
                let message = err.message();
                self.state.send_modify(|state| {
                    state.last_error = Some(message.clone());
                    state.register.fail(message);
                });
                let err = SessionError::from(err);
                err.log();
                Err(err)
            }
        }
    }
}
