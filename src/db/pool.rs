//! Database connection pool management.

use crate::config::DatabaseConfig;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tracing::info;

/// Connection pool for the glossary database.
#[derive(Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Connects to the glossary database.
    ///
    /// # Arguments
    /// * `database_url` - PostgreSQL connection string
    /// * `config` - pool sizing and timeout settings
    ///
    /// # Errors
    /// Returns an error if the connection cannot be established.
    pub async fn new(database_url: &str, config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(database_url)
            .await?;

        info!("Database connection pool established");

        Ok(Self { pool })
    }

    /// Returns a reference to the underlying pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Applies the glossary schema migrations.
    ///
    /// # Errors
    /// Returns an error if migrations fail.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations completed");
        Ok(())
    }
}
