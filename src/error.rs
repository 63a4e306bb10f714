//! Error types for the REST API.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;


/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
    /// Error code.
    pub code: String,
}

/// API error types.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Concept scheme not found.
    #[error("Concept scheme not found: {0}")]
    SchemeNotFound(String),

    /// Concept not found.
    #[error("Concept not found: {0}")]
    ConceptNotFound(String),

    /// Collection not found.
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Missing or invalid API key.
    #[error("Invalid API key")]
    InvalidApiKey,

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::SchemeNotFound(_) => (StatusCode::NOT_FOUND, "SCHEME_NOT_FOUND"),
            ApiError::ConceptNotFound(_) => (StatusCode::NOT_FOUND, "CONCEPT_NOT_FOUND"),
            ApiError::CollectionNotFound(_) => (StatusCode::NOT_FOUND, "COLLECTION_NOT_FOUND"),
            ApiError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            ApiError::InvalidApiKey => (StatusCode::FORBIDDEN, "INVALID_API_KEY"),
            ApiError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Database(err.to_string())
    }
}
