//! Session Store
//!
//! Owns the derived identity and the session lifecycle. The token itself
//! lives in the shared [`TokenVault`] so Transport can purge it directly.
//!
//! Each operation writes only its own request lifecycle; the operations
//! themselves live next to this file (`login.rs`, `register.rs`, ...).

use std::sync::Arc;

use kernel::lifecycle::RequestState;
use platform::{RequestSequence, TokenVault};
use tokio::sync::watch;

use crate::domain::entity::identity::Identity;
use crate::domain::entity::session::{Session, SessionLifecycle};

/// Mutable state behind a [`SessionStore`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub identity: Option<Identity>,
    pub lifecycle: SessionLifecycle,
    pub last_error: Option<String>,
    pub login: RequestState,
    pub register: RequestState,
    pub identity_request: RequestState,
}

impl SessionState {
    /// Combine with the current vault token into a [`Session`]
    ///
    /// Without a token the identity is hidden.
    pub fn to_session(&self, token: Option<String>) -> Session {
        let identity = token.as_ref().and(self.identity.clone());
        Session {
            token,
            identity,
            lifecycle: self.lifecycle,
            last_error: self.last_error.clone(),
            identity_status: self.identity_request.status(),
        }
    }
}

/// Session store
pub struct SessionStore<G> {
    pub(crate) gateway: G,
    pub(crate) vault: Arc<TokenVault>,
    pub(crate) state: watch::Sender<SessionState>,
    /// Abandoned whenever the credential changes under an identity fetch
    pub(crate) identity_sequence: RequestSequence,
}

impl<G> SessionStore<G> {
    pub fn new(gateway: G, vault: Arc<TokenVault>) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            gateway,
            vault,
            state,
            identity_sequence: RequestSequence::new(),
        }
    }

    pub fn vault(&self) -> &Arc<TokenVault> {
        &self.vault
    }

    /// Current session
    pub fn snapshot(&self) -> Session {
        self.state.borrow().to_session(self.vault.token())
    }

    /// Current store state, including per-operation lifecycles
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Observe store state changes
    ///
    /// Token changes are observed through [`TokenVault::subscribe`].
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Dismiss the last error message
    pub fn clear_error(&self) {
        self.state.send_if_modified(|state| state.last_error.take().is_some());
    }

    /// Fold a token purge done by Transport into the session state
    ///
    /// Returns whether anything changed. Called by the presentation layer
    /// when it receives [`platform::SessionSignal::Invalidated`].
    pub fn sync_invalidation(&self) -> bool {
        if self.vault.has_token() {
            return false;
        }
        let changed = self.state.send_if_modified(|state| {
            let stale = state.identity.is_some()
                || state.lifecycle != SessionLifecycle::Idle
                || state.identity_request.is_loading();
            if stale {
                state.identity = None;
                state.lifecycle = SessionLifecycle::Idle;
                state.login.reset();
                state.identity_request.reset();
            }
            stale
        });
        if changed {
            tracing::info!("Session cleared after token invalidation");
        }
        changed
    }
}

impl<G> std::fmt::Debug for SessionStore<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &*self.state.borrow())
            .field("vault", &self.vault)
            .finish_non_exhaustive()
    }
}
