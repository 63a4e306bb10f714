//! Dataset download and ingestion.
//!
//! `init_datasets` fetches every catalog entry as RDF/XML, parses it and
//! persists the result. One bad dataset never aborts the run; it is reported
//! in `failed_datasets` next to the ones that went through. Existing glossary
//! data is cleared first, so a run always reflects the catalog exactly.

use crate::config::{DatasetConfig, IngestConfig};
use crate::db;
use crate::models::{DatasetReport, FailedDatasetReport, InitDatasetsResponse};
use crate::xml::{self, XmlError};
use sqlx::PgPool;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info, warn};

/// Errors raised while ingesting a single dataset.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Download failed.
    #[error("download failed: {0}")]
    Download(#[from] reqwest::Error),

    /// Local file I/O failed.
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),

    /// The dataset is not valid SKOS RDF/XML.
    #[error("parse error: {0}")]
    Parse(#[from] XmlError),

    /// Persisting the dataset failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Downloads and ingests the configured SKOS datasets.
pub struct DatasetIngestor {
    http: reqwest::Client,
    config: IngestConfig,
}

impl DatasetIngestor {
    /// Creates an ingestor and its data directory.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created or the HTTP
    /// client cannot be built.
    pub fn new(config: IngestConfig) -> Result<Self, IngestError> {
        std::fs::create_dir_all(&config.data_dir)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.download_timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    /// Local path a dataset is stored under.
    fn dataset_path(&self, dataset: &DatasetConfig) -> PathBuf {
        Path::new(&self.config.data_dir).join(&dataset.name)
    }

    /// Returns the dataset XML, downloading it unless a local copy exists
    /// and `reload` is false.
    async fn fetch_dataset(
        &self,
        dataset: &DatasetConfig,
        reload: bool,
    ) -> Result<String, IngestError> {
        let path = self.dataset_path(dataset);

        if !reload && path.exists() {
            return Ok(tokio::fs::read_to_string(&path).await?);
        }

        let response = self.http.get(&dataset.url).send().await?;
        let body = response.error_for_status()?.text().await?;
        tokio::fs::write(&path, &body).await?;
        Ok(body)
    }

    /// Fetches, parses and stores one dataset.
    async fn ingest_dataset(
        &self,
        pool: &PgPool,
        dataset: &DatasetConfig,
        reload: bool,
    ) -> Result<(), IngestError> {
        let body = self.fetch_dataset(dataset, reload).await?;
        let parsed = xml::parse_dataset(&body)?;
        if parsed.is_empty() {
            warn!("Dataset {} contains no SKOS entities", dataset.name);
        }
        db::save_dataset(pool, &parsed).await?;
        info!(
            "Ingested {}: {} schemes, {} concepts, {} collections, {} relations",
            dataset.name,
            parsed.concept_schemes.len(),
            parsed.concepts.len(),
            parsed.collections.len(),
            parsed.semantic_relations.len(),
        );
        Ok(())
    }

    /// Runs a full ingestion cycle over the catalog.
    ///
    /// # Errors
    /// Returns an error only when the initial wipe of existing data fails;
    /// per-dataset failures land in the response instead.
    pub async fn run(
        &self,
        pool: &PgPool,
        reload: bool,
    ) -> Result<InitDatasetsResponse, IngestError> {
        db::clear_glossary(pool).await?;

        let mut response = InitDatasetsResponse::default();
        for dataset in &self.config.datasets {
            match self.ingest_dataset(pool, dataset, reload).await {
                Ok(()) => response.saved_datasets.push(DatasetReport {
                    name: dataset.name.clone(),
                    url: dataset.url.clone(),
                }),
                Err(err) => {
                    error!("Failed to ingest {}: {}", dataset.name, err);
                    response.failed_datasets.push(FailedDatasetReport {
                        name: dataset.name.clone(),
                        url: dataset.url.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }

        info!(
            "Dataset ingestion finished: {} saved, {} failed",
            response.saved_datasets.len(),
            response.failed_datasets.len(),
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(data_dir: &Path) -> IngestConfig {
        IngestConfig {
            data_dir: data_dir.to_string_lossy().into_owned(),
            download_timeout_secs: 5,
            datasets: vec![DatasetConfig {
                name: "sample.rdf".to_string(),
                url: "https://example.invalid/sample.rdf".to_string(),
            }],
        }
    }

    #[test]
    fn test_new_creates_data_dir() {
        let dir = std::env::temp_dir().join("dds-glossary-ingest-test");
        let _ = std::fs::remove_dir_all(&dir);

        let ingestor = DatasetIngestor::new(test_config(&dir)).expect("should build");
        assert!(dir.is_dir());
        assert_eq!(
            ingestor.dataset_path(&ingestor.config.datasets[0]),
            dir.join("sample.rdf")
        );

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_fetch_dataset_uses_local_copy() {
        let dir = std::env::temp_dir().join("dds-glossary-ingest-cache-test");
        let _ = std::fs::remove_dir_all(&dir);

        let ingestor = DatasetIngestor::new(test_config(&dir)).expect("should build");
        let dataset = ingestor.config.datasets[0].clone();

        // The URL is unreachable, so a hit proves the local copy was used.
        std::fs::write(ingestor.dataset_path(&dataset), "<cached/>").unwrap();
        let body = ingestor
            .fetch_dataset(&dataset, false)
            .await
            .expect("should read local copy");
        assert_eq!(body, "<cached/>");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_fetch_dataset_reload_ignores_local_copy() {
        let dir = std::env::temp_dir().join("dds-glossary-ingest-reload-test");
        let _ = std::fs::remove_dir_all(&dir);

        let ingestor = DatasetIngestor::new(test_config(&dir)).expect("should build");
        let dataset = ingestor.config.datasets[0].clone();

        std::fs::write(ingestor.dataset_path(&dataset), "<cached/>").unwrap();
        let result = ingestor.fetch_dataset(&dataset, true).await;
        assert!(matches!(result, Err(IngestError::Download(_))));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
