//! HTTP client library for the DDS Glossary API.
//!
//! This crate provides a typed HTTP client for interacting with the DDS
//! Glossary backend API: browsing concept schemes, concepts and collections,
//! searching labels and triggering dataset ingestion.
//!
//! # Example
//!
//! ```no_run
//! use glossary_client::{ClientConfig, GlossaryClient};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), glossary_client::Error> {
//!     let client = GlossaryClient::new(ClientConfig {
//!         base_url: "http://localhost:8000".into(),
//!         timeout: Duration::from_secs(30),
//!         api_key: None,
//!     })?;
//!
//!     // Check the server version
//!     let version = client.version().await?;
//!     println!("Version: {}", version.version);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::{ClientConfig, GlossaryClient};
pub use error::Error;
pub use types::*;
