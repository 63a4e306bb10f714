//! Error types for the glossary client.

use thiserror::Error;

/// Client error types.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Query string encoding failed.
    #[error("query encoding error: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),

    /// API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from API.
        message: String,
    },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request was rejected for a missing or invalid API key.
    #[error("Forbidden: {0}")]
    Forbidden(String),
}
