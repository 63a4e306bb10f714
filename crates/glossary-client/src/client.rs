//! HTTP client for the glossary API.

use crate::error::Error;
use crate::types::*;
use reqwest::Client;
use std::time::Duration;


/// Header carrying the API key for protected endpoints.
const API_KEY_HEADER: &str = "X-API-Key";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API (e.g., "http://localhost:8000").
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// API key for the dataset initialization endpoint.
    pub api_key: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout: Duration::from_secs(30),
            api_key: None,
        }
    }
}

/// HTTP client for the DDS Glossary API.
#[derive(Debug, Clone)]
pub struct GlossaryClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl GlossaryClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    /// Creates a new client with default configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::new(ClientConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        })
    }

    // ========================================================================
    // Health
    // ========================================================================

    /// Gets the server version.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn version(&self) -> Result<VersionResponse, Error> {
        let url = format!("{}/version", self.base_url);
        let resp = self.client.get(&url).send().await?;
        self.handle_response(resp).await
    }

    // ========================================================================
    // Schemes
    // ========================================================================

    /// Lists all concept schemes.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn list_schemes(&self, lang: &str) -> Result<Vec<ConceptScheme>, Error> {
        let url = self.url_with_query("/api/v1/schemes", &[("lang", lang)])?;
        let resp = self.client.get(&url).send().await?;
        self.handle_response(resp).await
    }

    /// Gets a concept scheme with its member collections and concepts.
    ///
    /// # Errors
    /// Returns error if the request fails or the scheme does not exist.
    pub async fn get_scheme(
        &self,
        scheme_iri: &str,
        lang: &str,
    ) -> Result<FullConceptScheme, Error> {
        let url = self.url_with_query(
            "/api/v1/scheme",
            &[("concept_scheme_iri", scheme_iri), ("lang", lang)],
        )?;
        let resp = self.client.get(&url).send().await?;
        self.handle_response(resp).await
    }

    // ========================================================================
    // Concepts
    // ========================================================================

    /// Lists the concepts of a scheme.
    ///
    /// # Errors
    /// Returns error if the request fails or the scheme does not exist.
    pub async fn list_concepts(
        &self,
        scheme_iri: &str,
        lang: &str,
    ) -> Result<ConceptsList, Error> {
        let url = self.url_with_query(
            "/api/v1/concepts",
            &[("concept_scheme_iri", scheme_iri), ("lang", lang)],
        )?;
        let resp = self.client.get(&url).send().await?;
        self.handle_response(resp).await
    }

    /// Gets a concept with its schemes and relations.
    ///
    /// # Errors
    /// Returns error if the request fails or the concept does not exist.
    pub async fn get_concept(&self, concept_iri: &str, lang: &str) -> Result<FullConcept, Error> {
        let url = self.url_with_query(
            "/api/v1/concept",
            &[("concept_iri", concept_iri), ("lang", lang)],
        )?;
        let resp = self.client.get(&url).send().await?;
        self.handle_response(resp).await
    }

    // ========================================================================
    // Collections
    // ========================================================================

    /// Lists the collections of a scheme.
    ///
    /// # Errors
    /// Returns error if the request fails or the scheme does not exist.
    pub async fn list_collections(
        &self,
        scheme_iri: &str,
        lang: &str,
    ) -> Result<Vec<Entity>, Error> {
        let url = self.url_with_query(
            "/api/v1/collections",
            &[("concept_scheme_iri", scheme_iri), ("lang", lang)],
        )?;
        let resp = self.client.get(&url).send().await?;
        self.handle_response(resp).await
    }

    /// Gets a collection with its members.
    ///
    /// # Errors
    /// Returns error if the request fails or the collection does not exist.
    pub async fn get_collection(
        &self,
        collection_iri: &str,
        lang: &str,
    ) -> Result<Collection, Error> {
        let url = self.url_with_query(
            "/api/v1/collection",
            &[("collection_iri", collection_iri), ("lang", lang)],
        )?;
        let resp = self.client.get(&url).send().await?;
        self.handle_response(resp).await
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Searches concepts by preferred label.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn search(&self, term: &str, lang: &str) -> Result<Vec<Concept>, Error> {
        let url =
            self.url_with_query("/api/v1/search", &[("search_term", term), ("lang", lang)])?;
        let resp = self.client.get(&url).send().await?;
        self.handle_response(resp).await
    }

    // ========================================================================
    // Administration
    // ========================================================================

    /// Downloads, parses and stores the configured datasets.
    ///
    /// Requires the configured API key.
    ///
    /// # Errors
    /// Returns error if the request fails or the API key is rejected.
    pub async fn init_datasets(&self, reload: bool) -> Result<InitDatasetsReport, Error> {
        let reload = reload.to_string();
        let url =
            self.url_with_query("/api/v1/init_datasets", &[("reload", reload.as_str())])?;
        let mut request = self.client.post(&url);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }
        let resp = request.send().await?;
        self.handle_response(resp).await
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    fn url_with_query(&self, path: &str, params: &[(&str, &str)]) -> Result<String, Error> {
        let query = serde_urlencoded::to_string(params)?;
        Ok(format!("{}{}?{}", self.base_url, path, query))
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();

        if status.is_success() {
            Ok(resp.json().await?)
        } else if status.as_u16() == 404 {
            let text = resp.text().await.unwrap_or_default();
            Err(Error::NotFound(text))
        } else if status.as_u16() == 403 {
            let text = resp.text().await.unwrap_or_default();
            Err(Error::Forbidden(text))
        } else {
            let text = resp.text().await.unwrap_or_default();
            Err(Error::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}
