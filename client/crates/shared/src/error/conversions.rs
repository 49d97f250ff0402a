//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from common error types to [`AppError`].

use super::app_error::AppError;
use super::kind::ErrorKind;
use super::validation::ValidationError;

// ============================================================================
// Standard library conversions
// ============================================================================

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::TimedOut => ErrorKind::RequestTimeout,
            std::io::ErrorKind::ConnectionRefused
            | std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionAborted => ErrorKind::Network,
            _ => ErrorKind::InternalServerError,
        };
        AppError::new(kind, "I/O operation failed").with_source(err)
    }
}

// ============================================================================
// serde_json conversions
// ============================================================================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::internal(format!("Unexpected response format: {}", err)).with_source(err)
    }
}

// ============================================================================
// Client-side validation
// ============================================================================

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

// ============================================================================
// HTTP types (feature-gated)
// ============================================================================

#[cfg(feature = "http")]
impl From<http::StatusCode> for ErrorKind {
    fn from(status: http::StatusCode) -> Self {
        ErrorKind::from_status(status.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let app_err: AppError = io_err.into();
        assert_eq!(app_err.kind(), ErrorKind::Network);

        let io_err = std::io::Error::new(std::io::ErrorKind::TimedOut, "slow");
        let app_err: AppError = io_err.into();
        assert_eq!(app_err.kind(), ErrorKind::RequestTimeout);
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let app_err: AppError = json_err.into();
        assert_eq!(app_err.kind(), ErrorKind::InternalServerError);
    }

    #[test]
    fn test_validation_error_conversion() {
        let app_err: AppError = ValidationError::new("title", "must not be empty").into();
        assert_eq!(app_err.kind(), ErrorKind::Validation);
        assert_eq!(app_err.message(), "title: must not be empty");
    }
}
