//! # DDS Glossary - SKOS Glossary Web Service
//!
//! A REST API server for browsing SKOS ([Simple Knowledge Organization
//! System](https://www.w3.org/TR/skos-reference/)) glossaries: concept
//! schemes, concepts, collections and the semantic relations between
//! concepts. Datasets are ingested from published RDF/XML files (Eurostat
//! classifications, FAO Caliper) into PostgreSQL, and served with per-request
//! language resolution. Built with [Axum](https://crates.io/crates/axum) and
//! [sqlx](https://crates.io/crates/sqlx), with OpenAPI/Swagger documentation
//! via [utoipa](https://crates.io/crates/utoipa).
//!
//! ## Key Features
//!
//! - **SKOS data model**: concept schemes, concepts, collections, scheme and
//!   collection membership, and typed semantic relations.
//!
//! - **Dataset ingestion**: a configurable catalog of RDF/XML datasets is
//!   downloaded, parsed and stored in one call; failures are reported
//!   per dataset.
//!
//! - **Language resolution**: every read endpoint takes a `lang` parameter;
//!   labels fall back to English and then to empty values.
//!
//! - **Label search**: case-insensitive substring search over preferred
//!   labels, resolved in the requested language.
//!
//! - **OpenAPI Documentation**: auto-generated Swagger UI at `/swagger-ui/`.
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | Route handlers and router configuration |
//! | [`auth`] | API key verification for the ingestion endpoint |
//! | [`config`] | TOML configuration and environment contract |
//! | [`db`] | PostgreSQL pool, migrations and glossary queries |
//! | [`error`] | API error types with `IntoResponse` implementation |
//! | [`ingest`] | Dataset download and ingestion pipeline |
//! | [`models`] | Request/response DTOs with OpenAPI schemas |
//! | [`skos`] | SKOS domain types and language fallback |
//! | [`state`] | Application state management |
//! | [`xml`] | SKOS RDF/XML parsing |
//!
//! ## API Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/version` | Server version (container health probe) |
//! | GET | `/api/v1/schemes` | List concept schemes |
//! | GET | `/api/v1/scheme` | One scheme with members |
//! | GET | `/api/v1/concepts` | Concepts of a scheme |
//! | GET | `/api/v1/concept` | One concept with relations |
//! | GET | `/api/v1/collections` | Collections of a scheme |
//! | GET | `/api/v1/collection` | One collection with members |
//! | GET | `/api/v1/search` | Search concepts by label |
//! | POST | `/api/v1/init_datasets` | Ingest the dataset catalog (API key) |
//!
//! IRIs contain slashes, so entities are addressed through query parameters
//! (`concept_iri`, `concept_scheme_iri`, `collection_iri`) rather than path
//! segments.
//!
//! ## Example Usage
//!
//! ```bash
//! # Start the server (DATABASE_URL and API_KEY are required)
//! DATABASE_URL=postgres://localhost/glossary API_KEY=secret cargo run
//!
//! # Health probe
//! curl http://localhost:8000/version
//!
//! # Ingest the catalog
//! curl -X POST -H "X-API-Key: secret" http://localhost:8000/api/v1/init_datasets
//!
//! # Browse
//! curl http://localhost:8000/api/v1/schemes
//! curl "http://localhost:8000/api/v1/search?search_term=wheat&lang=en"
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod ingest;
pub mod models;
pub mod skos;
pub mod state;
pub mod xml;
