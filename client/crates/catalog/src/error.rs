//! Catalog Error Types
//!
//! This module provides catalog-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind, validation::ValidationError};
use platform::TransportError;
use thiserror::Error;

/// Catalog-specific result type alias
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog-specific error variants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Draft or patch rejected before any request was made
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A newer request for the same operation was issued; nothing was applied
    #[error("Superseded by a newer request")]
    Superseded,

    /// The server or network rejected the request
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl CatalogError {
    /// Display-ready message
    pub fn message(&self) -> String {
        match self {
            CatalogError::Transport(err) => err.message(),
            other => other.to_string(),
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Validation(_) => ErrorKind::Validation,
            CatalogError::Superseded => ErrorKind::Conflict,
            CatalogError::Transport(err) => err.kind(),
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, CatalogError::Superseded)
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            CatalogError::Transport(err) => err.log(),
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(e) => e.into(),
            CatalogError::Transport(e) => e.into(),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detail() {
        let err = CatalogError::from(TransportError::Status {
            status: 404,
            message: "Problem not found".into(),
        });
        assert_eq!(err.message(), "Problem not found");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_superseded_is_not_retryable() {
        let app: AppError = CatalogError::Superseded.into();
        assert_eq!(app.kind(), ErrorKind::Conflict);
        assert!(!app.is_retryable());
    }
}
