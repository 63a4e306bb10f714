//! Configuration module for loading and parsing TOML configuration files.
//!
//! Server settings and the dataset catalog live in the TOML file; deployment
//! secrets (`DATABASE_URL`, `API_KEY`, `SENTRY_DSN`) and the bind address
//! overrides (`HOST_IP`, `PORT`) come from the environment, matching the
//! container contract.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse TOML configuration.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Invalid configuration value.
    #[error("invalid config value: {0}")]
    InvalidValue(String),
    /// A required environment variable is missing.
    #[error("missing environment variable: {0}")]
    MissingEnv(&'static str),
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database pool configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Dataset ingestion configuration.
    #[serde(default)]
    pub ingest: IngestConfig,
    /// Deployment secrets, filled from the environment.
    #[serde(skip)]
    pub secrets: Secrets,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port number to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Database pool configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Maximum number of pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Seconds to wait for a connection from the pool.
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout_secs() -> u64 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
        }
    }
}

/// Dataset ingestion configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestConfig {
    /// Directory where downloaded RDF files are kept.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Download timeout in seconds.
    #[serde(default = "default_download_timeout_secs")]
    pub download_timeout_secs: u64,
    /// Datasets to ingest; defaults to the built-in catalog.
    #[serde(default = "default_datasets")]
    pub datasets: Vec<DatasetConfig>,
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_download_timeout_secs() -> u64 {
    60
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            download_timeout_secs: default_download_timeout_secs(),
            datasets: default_datasets(),
        }
    }
}

/// One SKOS dataset to download and ingest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatasetConfig {
    /// File name the dataset is saved under.
    pub name: String,
    /// Download URL of the RDF/XML file.
    pub url: String,
}

/// Values sourced from the environment rather than the TOML file.
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Key required by the `init_datasets` endpoint.
    pub api_key: String,
    /// Observability DSN, forwarded by the deployment. Unused beyond logging.
    pub sentry_dsn: Option<String>,
}

const EUROPA_URL: &str = "http://publications.europa.eu/resource/distribution/";
const FAO_URL: &str = "https://storage.googleapis.com/fao-datalab-caliper/Downloads/";

/// The built-in catalog of Eurostat and FAO Caliper SKOS datasets.
fn default_datasets() -> Vec<DatasetConfig> {
    let dataset = |name: &str, url: String| DatasetConfig {
        name: name.to_string(),
        url,
    };
    vec![
        dataset(
            "ESTAT-CN2024.rdf",
            format!(
                "{EUROPA_URL}combined-nomenclature-2024/20240425-0/rdf/skos_core/ESTAT-CN2024.rdf"
            ),
        ),
        dataset(
            "ESTAT-LoW2015.rdf",
            format!("{EUROPA_URL}low2015/20240425-0/rdf/skos_core/ESTAT-LoW2015.rdf"),
        ),
        dataset(
            "ESTAT-NACE2.1.rdf",
            format!("{EUROPA_URL}nace2.1/20240425-0/rdf/skos_core/ESTAT-NACE2.1.rdf"),
        ),
        dataset(
            "ESTAT-ICST-COM.rdf",
            format!("{EUROPA_URL}icst-com/20240425-0/rdf/skos_core/ESTAT-ICST-COM.rdf"),
        ),
        dataset(
            "ESTAT-PRODCOM2023.rdf",
            format!("{EUROPA_URL}prodcom2023/20240425-0/rdf/skos_core/ESTAT-PRODCOM2023.rdf"),
        ),
        dataset("ISIC4.rdf", format!("{FAO_URL}ISICRev4/ISIC4.rdf")),
        dataset("ICC11.rdf", format!("{FAO_URL}ICCv1.1/ICC11.rdf")),
        dataset("WCACROPS.rdf", format!("{FAO_URL}WCA2020Crops/WCACROPS.rdf")),
    ]
}

impl Config {
    /// Loads configuration from a TOML file and fills secrets from the
    /// environment.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed, a value fails
    /// validation, or `DATABASE_URL`/`API_KEY` are unset.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;
        config.apply_env()?;
        Ok(config)
    }

    /// Builds a default configuration with secrets from the environment.
    /// Used when no config file is present.
    ///
    /// # Errors
    /// Returns error if `DATABASE_URL` or `API_KEY` are unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Parses configuration from a TOML string. Secrets stay empty.
    ///
    /// # Errors
    /// Returns error if content cannot be parsed or fails validation.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Applies environment overrides and required secrets.
    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(host) = std::env::var("HOST_IP") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidValue(format!("PORT is not a number: {port}")))?;
        }

        self.secrets.database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingEnv("DATABASE_URL"))?;
        self.secrets.api_key =
            std::env::var("API_KEY").map_err(|_| ConfigError::MissingEnv("API_KEY"))?;
        self.secrets.sentry_dsn = std::env::var("SENTRY_DSN").ok().filter(|dsn| !dsn.is_empty());

        Ok(())
    }

    /// Validates the configuration values.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue(
                "server port must be non-zero".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "database max_connections must be positive".to_string(),
            ));
        }
        if self.ingest.data_dir.is_empty() {
            return Err(ConfigError::InvalidValue(
                "ingest data_dir cannot be empty".to_string(),
            ));
        }
        if self.ingest.download_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "ingest download_timeout_secs must be positive".to_string(),
            ));
        }

        for dataset in &self.ingest.datasets {
            if dataset.name.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "dataset name cannot be empty".to_string(),
                ));
            }
            if dataset.url.is_empty() {
                return Err(ConfigError::InvalidValue(format!(
                    "dataset {} has an empty url",
                    dataset.name
                )));
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            ingest: IngestConfig::default(),
            secrets: Secrets::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[server]
host = "127.0.0.1"
port = 9000

[ingest]
data_dir = "/var/lib/glossary"
download_timeout_secs = 30

[[ingest.datasets]]
name = "ISIC4.rdf"
url = "https://example.org/ISIC4.rdf"

[[ingest.datasets]]
name = "ICC11.rdf"
url = "https://example.org/ICC11.rdf"
"#;

        let config = Config::parse(toml_content).expect("should parse");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.ingest.data_dir, "/var/lib/glossary");
        assert_eq!(config.ingest.download_timeout_secs, 30);
        assert_eq!(config.ingest.datasets.len(), 2);
        assert_eq!(config.ingest.datasets[0].name, "ISIC4.rdf");
    }

    #[test]
    fn test_parse_config_defaults() {
        let config = Config::parse("").expect("should parse");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.ingest.datasets.len(), 8);
    }

    #[test]
    fn test_default_catalog_covers_estat_and_fao() {
        let datasets = default_datasets();
        assert_eq!(datasets.len(), 8);
        assert!(datasets.iter().any(|d| d.name == "ESTAT-CN2024.rdf"));
        assert!(
            datasets
                .iter()
                .filter(|d| d.url.starts_with(FAO_URL))
                .count()
                == 3
        );
    }

    #[test]
    fn test_parse_database_section() {
        let config = Config::parse("[database]\nmax_connections = 4\n").expect("should parse");
        assert_eq!(config.database.max_connections, 4);
        assert_eq!(config.database.acquire_timeout_secs, 5);
    }

    #[test]
    fn test_validation_zero_max_connections() {
        let result = Config::parse("[database]\nmax_connections = 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_zero_port() {
        let result = Config::parse("[server]\nhost = \"0.0.0.0\"\nport = 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_empty_dataset_url() {
        let toml_content = r#"
[[ingest.datasets]]
name = "broken.rdf"
url = ""
"#;
        assert!(Config::parse(toml_content).is_err());
    }

    #[test]
    fn test_validation_empty_data_dir() {
        let result = Config::parse("[ingest]\ndata_dir = \"\"\ndownload_timeout_secs = 10\n");
        assert!(result.is_err());
    }
}
