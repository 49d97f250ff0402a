//! Logout

use crate::application::store::{SessionState, SessionStore};

impl<G> SessionStore<G> {
    /// Clear token, identity and persisted storage
    ///
    /// Idempotent. A user-initiated logout raises no invalidation signal.
    pub fn logout(&self) {
        let had_token = self.vault.clear();
        self.identity_sequence.abandon();
        self.state.send_if_modified(|state| {
            let changed = *state != SessionState::default();
            *state = SessionState::default();
            changed
        });
        if had_token {
            tracing::info!("Logged out");
        }
    }
}
