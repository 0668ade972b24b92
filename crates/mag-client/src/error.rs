//! Client error types.

use thiserror::Error;

/// Errors that can occur when talking to the hosting service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error (DNS, connect, timeout, interrupted body).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The service returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Failed to decode a response body.
    #[error("parse error: {0}")]
    Parse(String),

    /// Neither the call nor the client carries an API key.
    #[error("no API key configured; set api.key or pass one per call")]
    MissingCredential,
}

impl ClientError {
    /// `true` when the device could not reach the service at all, so callers can
    /// show "no connection" rather than a generic failure.
    #[must_use]
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_connect() || e.is_timeout())
    }

    /// `true` when the service rejected the API key.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401 | 403, .. })
    }
}
