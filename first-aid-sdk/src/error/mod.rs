//! Error handling for the first-aid SDK
//!
//! Every client operation resolves to `Result<T, ServiceError>`. Transport
//! failures are folded into four kinds the front end knows how to render:
//! - unreachable backend
//! - timeout
//! - non-2xx HTTP status (with a body excerpt)
//! - anything unexpected

use std::fmt;
use thiserror::Error;

pub mod mapping;

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Maximum number of body characters quoted in an HTTP status error
pub const BODY_EXCERPT_CHARS: usize = 200;

/// Coarse failure category used by callers to pick a rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The backend refused the connection or could not be resolved
    Unreachable,
    /// The per-call deadline elapsed
    Timeout,
    /// The backend answered with a non-2xx status
    HttpStatus,
    /// Everything else
    Unexpected,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Unreachable => "network-unreachable",
            ErrorKind::Timeout => "timeout",
            ErrorKind::HttpStatus => "http-error",
            ErrorKind::Unexpected => "unexpected",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main error type for the SDK
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Connection refused, DNS failure and similar
    #[error("Could not connect to backend at {base_url}. Is it running?")]
    Unreachable {
        base_url: String,
        detail: String,
    },

    /// Request exceeded its timeout
    #[error("Request timeout - backend is slow to respond")]
    Timeout(String),

    /// Non-2xx HTTP response
    #[error("HTTP Error: {status} - {body}")]
    HttpStatus {
        status: u16,
        /// First [`BODY_EXCERPT_CHARS`] characters of the response body
        body: String,
    },

    /// The backend answered 2xx but reported an error in its envelope
    #[error("{0}")]
    Backend(String),

    /// Local configuration problems
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Local input problems detected before sending anything
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unexpected or internal errors
    #[error("{0}")]
    Unexpected(String),
}

impl ServiceError {
    /// Create an unreachable-backend error
    pub fn unreachable(base_url: impl Into<String>, detail: impl Into<String>) -> Self {
        ServiceError::Unreachable {
            base_url: base_url.into(),
            detail: detail.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout(detail: impl Into<String>) -> Self {
        ServiceError::Timeout(detail.into())
    }

    /// Create an HTTP status error, truncating the body excerpt
    pub fn http_status(status: u16, body: &str) -> Self {
        ServiceError::HttpStatus {
            status,
            body: excerpt(body, BODY_EXCERPT_CHARS),
        }
    }

    /// Create an error reported inside a backend envelope
    pub fn backend(message: impl Into<String>) -> Self {
        ServiceError::Backend(message.into())
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        ServiceError::Configuration(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        ServiceError::Unexpected(message.into())
    }

    /// The coarse category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Unreachable { .. } => ErrorKind::Unreachable,
            ServiceError::Timeout(_) => ErrorKind::Timeout,
            ServiceError::HttpStatus { .. } => ErrorKind::HttpStatus,
            ServiceError::Backend(_)
            | ServiceError::Configuration(_)
            | ServiceError::Validation(_)
            | ServiceError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }

    /// Get the HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ServiceError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message suitable for showing to the end user
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Take at most `max_chars` characters of `s`, never splitting a char
pub fn excerpt(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

/// Convert reqwest errors to ServiceError.
///
/// The base URL is not known here; the client rewrites connect errors with
/// [`ServiceError::unreachable`] before returning them.
impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ServiceError::timeout(err.to_string())
        } else if err.is_connect() {
            let base_url = err
                .url()
                .map(|u| u.origin().ascii_serialization())
                .unwrap_or_else(|| "unknown".to_string());
            ServiceError::unreachable(base_url, err.to_string())
        } else if let Some(status) = err.status() {
            ServiceError::http_status(status.as_u16(), "")
        } else {
            ServiceError::unexpected(err.to_string())
        }
    }
}

/// Convert serde_json errors to ServiceError
impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::unexpected(format!("Invalid JSON payload: {}", err))
    }
}
