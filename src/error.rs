//! Error types for the Juice WRLD API client.
//!
//! Failures fall into two families. The API taxonomy (`RateLimited`, `NotFound`,
//! `Unauthenticated`, `Api`, `Validation`) describes what the server, or the
//! client before sending anything, rejected. Everything else is a transport-level
//! failure and is never coerced into the API taxonomy.

use reqwest::StatusCode;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the Juice WRLD API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The server answered 429 Too Many Requests.
    #[error("rate limited ({status}): {message}")]
    RateLimited { status: u16, message: String },

    /// The server answered 404 Not Found.
    #[error("not found ({status}): {message}")]
    NotFound { status: u16, message: String },

    /// The server answered 401 Unauthorized.
    #[error("authentication failed ({status}): {message}")]
    Unauthenticated { status: u16, message: String },

    /// Any other status code >= 400.
    #[error("api error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Input rejected on the client side before any request was sent.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Network, TLS or protocol failure reported by the HTTP client.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A 2xx body that could not be parsed into the expected type.
    #[error("JSON parsing failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// A 2xx body that parsed but does not have the expected envelope.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// The base address or a derived request URL is malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Local filesystem failure while persisting a download.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The caller's cancellation token fired before the call completed.
    #[error("request cancelled")]
    Cancelled,
}

impl Error {
    /// Maps a non-success status code and its raw body onto the API taxonomy.
    pub fn from_status(status: StatusCode, message: String) -> Self {
        let code = status.as_u16();
        match status {
            StatusCode::TOO_MANY_REQUESTS => Error::RateLimited {
                status: code,
                message,
            },
            StatusCode::NOT_FOUND => Error::NotFound {
                status: code,
                message,
            },
            StatusCode::UNAUTHORIZED => Error::Unauthenticated {
                status: code,
                message,
            },
            _ => Error::Api {
                status: code,
                message,
            },
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// HTTP status carried by the error, if any. Validation errors report 0.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::RateLimited { status, .. }
            | Error::NotFound { status, .. }
            | Error::Unauthenticated { status, .. }
            | Error::Api { status, .. } => Some(*status),
            Error::Validation(_) => Some(0),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Raw server message for API taxonomy errors.
    pub fn message(&self) -> Option<&str> {
        match self {
            Error::RateLimited { message, .. }
            | Error::NotFound { message, .. }
            | Error::Unauthenticated { message, .. }
            | Error::Api { message, .. } => Some(message),
            Error::Validation(message) => Some(message),
            _ => None,
        }
    }

    /// True for errors in the API taxonomy, false for transport-level failures.
    pub fn is_api_error(&self) -> bool {
        matches!(
            self,
            Error::RateLimited { .. }
                | Error::NotFound { .. }
                | Error::Unauthenticated { .. }
                | Error::Api { .. }
                | Error::Validation(_)
        )
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}
