//! API error types.

use thiserror::Error;

/// Errors that can occur when talking to the operations backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Failed to parse a backend response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Publishing was refused because the project hit its version ceiling.
    #[error("version limit reached: {message}")]
    VersionLimit {
        /// Message returned by the backend.
        message: String,
    },

    /// The backend returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The client could not be built from configuration.
    #[error("invalid client configuration: {0}")]
    Config(String),
}
