//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum used to classify every failure the client
//! can surface, whether it came back from the server or never left the client.

use serde::Serialize;

/// Classification of client-visible errors
///
/// HTTP-derived variants map one-to-one to the status code the server
/// returned. `Network` and `Validation` never correspond to a response.
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::from_status(404);
/// assert_eq!(kind, ErrorKind::NotFound);
/// assert_eq!(kind.as_str(), "Not Found");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// 400 - Bad Request
    BadRequest,
    /// 401 - Unauthorized
    Unauthorized,
    /// 403 - Forbidden
    Forbidden,
    /// 404 - Not Found
    NotFound,
    /// 408 - Request Timeout
    RequestTimeout,
    /// 409 - Conflict
    Conflict,
    /// 422 - Unprocessable Entity
    UnprocessableEntity,
    /// 429 - Too Many Requests
    TooManyRequests,
    /// 500 - Internal Server Error (also any unrecognised 5xx)
    InternalServerError,
    /// 503 - Service Unavailable
    ServiceUnavailable,
    /// The request never produced a response
    Network,
    /// Rejected by client-side validation, never sent
    Validation,
}

impl ErrorKind {
    /// Classify an HTTP status code
    ///
    /// Unrecognised 4xx codes become `BadRequest`, unrecognised 5xx codes
    /// become `InternalServerError`.
    pub const fn from_status(status: u16) -> Self {
        match status {
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            408 => ErrorKind::RequestTimeout,
            409 => ErrorKind::Conflict,
            422 => ErrorKind::UnprocessableEntity,
            429 => ErrorKind::TooManyRequests,
            503 => ErrorKind::ServiceUnavailable,
            500..=599 => ErrorKind::InternalServerError,
            _ => ErrorKind::BadRequest,
        }
    }

    /// Representative HTTP status code, if the kind came from a response
    #[inline]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            ErrorKind::BadRequest => Some(400),
            ErrorKind::Unauthorized => Some(401),
            ErrorKind::Forbidden => Some(403),
            ErrorKind::NotFound => Some(404),
            ErrorKind::RequestTimeout => Some(408),
            ErrorKind::Conflict => Some(409),
            ErrorKind::UnprocessableEntity => Some(422),
            ErrorKind::TooManyRequests => Some(429),
            ErrorKind::InternalServerError => Some(500),
            ErrorKind::ServiceUnavailable => Some(503),
            ErrorKind::Network | ErrorKind::Validation => None,
        }
    }

    /// Short human-readable label
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad Request",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::RequestTimeout => "Request Timeout",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::UnprocessableEntity => "Unprocessable Entity",
            ErrorKind::TooManyRequests => "Too Many Requests",
            ErrorKind::InternalServerError => "Internal Server Error",
            ErrorKind::ServiceUnavailable => "Service Unavailable",
            ErrorKind::Network => "Network Error",
            ErrorKind::Validation => "Validation Error",
        }
    }

    /// Whether the failure is worth retrying without changing the request
    ///
    /// Retry policy itself belongs to the caller; this only classifies.
    #[inline]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            ErrorKind::Network
                | ErrorKind::RequestTimeout
                | ErrorKind::TooManyRequests
                | ErrorKind::ServiceUnavailable
                | ErrorKind::InternalServerError
        )
    }

    /// Server-side (5xx) failure
    #[inline]
    pub const fn is_server_error(&self) -> bool {
        matches!(
            self,
            ErrorKind::InternalServerError | ErrorKind::ServiceUnavailable
        )
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
