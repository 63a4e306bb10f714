//! API key verification for the ingestion endpoint.

use crate::error::ApiError;
use axum::http::HeaderMap;
use sha2::{Digest, Sha256};

/// Header name for API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Hashes a key for comparison.
fn hash_key(key: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hasher.finalize().into()
}

/// Checks whether the presented key matches the expected one. Comparison
/// happens on SHA-256 digests so lengths never leak.
#[must_use]
pub fn key_matches(presented: &str, expected: &str) -> bool {
    if expected.is_empty() {
        return false;
    }
    hash_key(presented) == hash_key(expected)
}

/// Extracts the `X-API-Key` header and validates it against the configured
/// key.
///
/// # Errors
/// Returns [`ApiError::InvalidApiKey`] when the header is absent, unreadable
/// or does not match.
pub fn require_api_key(headers: &HeaderMap, expected: &str) -> Result<(), ApiError> {
    let presented = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(ApiError::InvalidApiKey)?;

    if key_matches(presented, expected) {
        Ok(())
    } else {
        Err(ApiError::InvalidApiKey)
    }
}
