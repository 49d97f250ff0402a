//! Transport Error Types
//!
//! Every failure of an outgoing request surfaces as a [`TransportError`]
//! carrying a display-ready message. Integrates with the unified
//! `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Transport result type alias
pub type TransportResult<T> = Result<T, TransportError>;

/// Message used when the server's error payload carries no usable `detail`
pub const FALLBACK_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Transport-level failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The bearer credential was rejected; the stored token has been purged
    #[error("{message}")]
    SessionInvalidated { message: String },

    /// A 2xx body could not be decoded into the expected shape
    #[error("Unexpected response format: {0}")]
    Decode(String),

    /// The request could not be built
    #[error("Invalid request: {0}")]
    Request(String),
}

impl TransportError {
    pub fn network(err: impl std::fmt::Display) -> Self {
        TransportError::Network(err.to_string())
    }

    /// Display-ready message (the server's `detail` for status errors)
    pub fn message(&self) -> String {
        match self {
            TransportError::Status { message, .. }
            | TransportError::SessionInvalidated { message } => message.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status, when the failure came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::SessionInvalidated { .. } => Some(401),
            _ => None,
        }
    }

    /// Whether the server rejected the request for authorization reasons
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_session_invalidated(&self) -> bool {
        matches!(self, TransportError::SessionInvalidated { .. })
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            TransportError::Network(_) => ErrorKind::Network,
            TransportError::Status { status, .. } => ErrorKind::from_status(*status),
            TransportError::SessionInvalidated { .. } => ErrorKind::Unauthorized,
            TransportError::Decode(_) => ErrorKind::InternalServerError,
            TransportError::Request(_) => ErrorKind::BadRequest,
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            TransportError::SessionInvalidated { .. } => {
                tracing::warn!("Request rejected: session invalidated");
            }
            TransportError::Status { status, message } if *status >= 500 => {
                tracing::warn!(status, message = %message, "Server error response");
            }
            TransportError::Decode(msg) => {
                tracing::warn!(message = %msg, "Undecodable response body");
            }
            _ => {
                tracing::debug!(error = %self, "Transport error");
            }
        }
    }
}

impl From<TransportError> for AppError {
    fn from(err: TransportError) -> Self {
        let app_err = AppError::new(err.kind(), err.message());
        match err {
            TransportError::SessionInvalidated { .. } => app_err.with_action("Please log in again"),
            TransportError::Network(_) => app_err.with_action("Check your connection and retry"),
            _ => app_err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message_is_detail() {
        let err = TransportError::Status {
            status: 404,
            message: "Problem not found".into(),
        };
        assert_eq!(err.message(), "Problem not found");
        assert_eq!(err.to_string(), "Problem not found");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_session_invalidated_is_unauthorized() {
        let err = TransportError::SessionInvalidated {
            message: "Could not validate credentials".into(),
        };
        assert!(err.is_unauthorized());
        assert!(err.is_session_invalidated());
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = TransportError::network("connection refused").into();
        assert_eq!(app.kind(), ErrorKind::Network);
        assert!(app.action().is_some());
        assert!(app.is_retryable());
    }
}
