//! Submission Error Types
//!
//! This module provides submission-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind, validation::ValidationError};
use kernel::id::SubmissionId;
use platform::TransportError;
use thiserror::Error;

/// Submission-specific result type alias
pub type SubmissionResult<T> = Result<T, SubmissionError>;

/// Submission-specific error variants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// Draft rejected before any request was made
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A newer request for the same operation was issued; nothing was applied
    #[error("Superseded by a newer request")]
    Superseded,

    /// Polling gave up before the judge reached a verdict
    #[error("No verdict for submission {id} after {attempts} checks")]
    VerdictTimeout { id: SubmissionId, attempts: u32 },

    /// The server or network rejected the request
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl SubmissionError {
    /// Display-ready message
    pub fn message(&self) -> String {
        match self {
            SubmissionError::Transport(err) => err.message(),
            other => other.to_string(),
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SubmissionError::Validation(_) => ErrorKind::Validation,
            SubmissionError::Superseded => ErrorKind::Conflict,
            SubmissionError::VerdictTimeout { .. } => ErrorKind::RequestTimeout,
            SubmissionError::Transport(err) => err.kind(),
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, SubmissionError::Superseded)
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            SubmissionError::Transport(err) => err.log(),
            SubmissionError::VerdictTimeout { id, attempts } => {
                tracing::warn!(submission_id = %id, attempts, "Verdict polling timed out");
            }
            _ => {
                tracing::debug!(error = %self, "Submission error");
            }
        }
    }
}

impl From<SubmissionError> for AppError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::Validation(e) => e.into(),
            SubmissionError::Transport(e) => e.into(),
            SubmissionError::VerdictTimeout { .. } => AppError::new(err.kind(), err.to_string())
                .with_action("Check the submission again later"),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message() {
        let err = SubmissionError::VerdictTimeout {
            id: SubmissionId::new("9"),
            attempts: 3,
        };
        assert_eq!(err.message(), "No verdict for submission 9 after 3 checks");
        assert_eq!(err.kind(), ErrorKind::RequestTimeout);
    }

    #[test]
    fn test_transport_detail() {
        let err = SubmissionError::from(TransportError::Status {
            status: 404,
            message: "Submission not found".into(),
        });
        assert_eq!(err.message(), "Submission not found");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = SubmissionError::Superseded.into();
        assert_eq!(app.kind(), ErrorKind::Conflict);
    }
}
