//! Session Error Types
//!
//! This module provides session-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind, validation::ValidationError};
use platform::TransportError;
use thiserror::Error;

/// Session-specific result type alias
pub type SessionResult<T> = Result<T, SessionError>;

/// Session-specific error variants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Input rejected before any request was made
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The operation needs a token and none is stored
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The session changed while the request was in flight; nothing was applied
    #[error("Superseded by a newer session change")]
    Superseded,

    /// The server or network rejected the request
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl SessionError {
    /// Display-ready message
    pub fn message(&self) -> String {
        match self {
            SessionError::Transport(err) => err.message(),
            other => other.to_string(),
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::Validation(_) => ErrorKind::Validation,
            SessionError::NotAuthenticated => ErrorKind::Unauthorized,
            SessionError::Superseded => ErrorKind::Conflict,
            SessionError::Transport(err) => err.kind(),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            SessionError::Transport(err) if err.is_unauthorized() => {
                tracing::warn!(message = %err.message(), "Session request rejected");
            }
            SessionError::Transport(err) => err.log(),
            _ => {
                tracing::debug!(error = %self, "Session error");
            }
        }
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Validation(e) => e.into(),
            SessionError::Transport(e) => e.into(),
            SessionError::NotAuthenticated => AppError::unauthorized("Not authenticated")
                .with_action("Run `skillslab login` first"),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}
