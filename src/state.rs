//! Application state management.

use crate::config::Config;
use crate::db::DatabasePool;
use crate::ingest::{DatasetIngestor, IngestError};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database pool.
    pub db: DatabasePool,
    /// Application configuration.
    pub config: Config,
    /// Dataset ingestor.
    pub ingestor: std::sync::Arc<DatasetIngestor>,
}

impl AppState {
    /// Creates the application state.
    ///
    /// # Errors
    /// Returns an error if the ingestor cannot set up its data directory or
    /// HTTP client.
    pub fn new(config: Config, db: DatabasePool) -> Result<Self, IngestError> {
        let ingestor = std::sync::Arc::new(DatasetIngestor::new(config.ingest.clone())?);
        Ok(Self {
            db,
            config,
            ingestor,
        })
    }
}
