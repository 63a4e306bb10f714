//! Route configuration.

use crate::api::handlers;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;

/// Creates the API router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health probe
        .route("/version", get(handlers::get_version))
        // Status page redirect
        .route("/api/v1/status", get(handlers::get_status))
        // Concept schemes
        .route("/api/v1/schemes", get(handlers::list_schemes))
        .route("/api/v1/scheme", get(handlers::get_scheme))
        // Concepts
        .route("/api/v1/concepts", get(handlers::list_concepts))
        .route("/api/v1/concept", get(handlers::get_concept))
        // Collections
        .route("/api/v1/collections", get(handlers::list_collections))
        .route("/api/v1/collection", get(handlers::get_collection))
        // Search
        .route("/api/v1/search", get(handlers::search))
        // Dataset ingestion
        .route("/api/v1/init_datasets", post(handlers::init_datasets))
        .with_state(state)
}
