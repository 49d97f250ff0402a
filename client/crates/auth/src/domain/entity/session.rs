//! Session Entity
//!
//! A read-only view of who is signed in. Built by the session store from
//! its own state plus the token vault, so an identity is never visible
//! without the token it was resolved with.

use kernel::lifecycle::RequestStatus;
use serde::Serialize;
use std::fmt;

use crate::domain::entity::identity::Identity;

/// Session-level lifecycle
///
/// `Ready` is only reachable from `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionLifecycle {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

impl SessionLifecycle {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for SessionLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Snapshot of the session
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Session {
    /// Bearer credential; `None` means anonymous
    #[serde(skip)]
    pub token: Option<String>,
    pub identity: Option<Identity>,
    pub lifecycle: SessionLifecycle,
    pub last_error: Option<String>,
    /// Status of the latest identity fetch
    pub identity_status: RequestStatus,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
