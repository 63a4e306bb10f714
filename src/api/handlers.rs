//! API request handlers.

use crate::auth::require_api_key;
use crate::db;
use crate::error::ApiError;
use crate::models::{
    CollectionQuery, CollectionResponse, ConceptQuery, ConceptResponse, ConceptSchemeResponse,
    ConceptsResponse, EntityResponse, FullConceptResponse, FullConceptSchemeResponse,
    InitDatasetsQuery, InitDatasetsResponse, LangQuery, RelationResponse, SchemeQuery, SearchQuery,
    VersionResponse,
};
use crate::state::AppState;
use crate::api::extract::Query;
use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Redirect;
use std::sync::Arc;

// ============================================================================
// Version / Health
// ============================================================================

/// Version endpoint, used as the container health probe.
#[utoipa::path(
    get,
    path = "/version",
    responses(
        (status = 200, description = "Server version", body = VersionResponse)
    ),
    tag = "Health"
)]
pub async fn get_version() -> Json<VersionResponse> {
    Json(VersionResponse::default())
}

/// Hosted status page for the service.
const STATUS_PAGE_URL: &str = "https://sentier.instatus.com/";

/// Redirect to the hosted status page.
#[utoipa::path(
    get,
    path = "/api/v1/status",
    responses(
        (status = 307, description = "Redirect to the status page")
    ),
    tag = "Health"
)]
pub async fn get_status() -> Redirect {
    Redirect::temporary(STATUS_PAGE_URL)
}

// ============================================================================
// Concept Schemes
// ============================================================================

/// List all concept schemes.
#[utoipa::path(
    get,
    path = "/api/v1/schemes",
    params(LangQuery),
    responses(
        (status = 200, description = "List of concept schemes", body = [ConceptSchemeResponse])
    ),
    tag = "Schemes"
)]
pub async fn list_schemes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LangQuery>,
) -> Result<Json<Vec<ConceptSchemeResponse>>, ApiError> {
    let schemes = db::get_concept_schemes(state.db.pool()).await?;
    Ok(Json(
        schemes
            .iter()
            .map(|scheme| ConceptSchemeResponse::from_scheme(scheme, &query.lang))
            .collect(),
    ))
}

/// Get one concept scheme with its member collections and concepts.
#[utoipa::path(
    get,
    path = "/api/v1/scheme",
    params(SchemeQuery),
    responses(
        (status = 200, description = "Concept scheme with members", body = FullConceptSchemeResponse),
        (status = 404, description = "Concept scheme not found")
    ),
    tag = "Schemes"
)]
pub async fn get_scheme(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SchemeQuery>,
) -> Result<Json<FullConceptSchemeResponse>, ApiError> {
    let pool = state.db.pool();
    let scheme = db::get_concept_scheme(pool, &query.concept_scheme_iri)
        .await?
        .ok_or_else(|| ApiError::SchemeNotFound(query.concept_scheme_iri.clone()))?;

    let collections = db::get_collections_in_scheme(pool, &scheme.iri).await?;
    let concepts = db::get_concepts_in_scheme(pool, &scheme.iri).await?;

    Ok(Json(FullConceptSchemeResponse {
        scheme: ConceptSchemeResponse::from_scheme(&scheme, &query.lang),
        collections: collections
            .iter()
            .map(|collection| EntityResponse::from_collection(collection, &query.lang))
            .collect(),
        concepts: concepts
            .iter()
            .map(|concept| ConceptResponse::from_concept(concept, &query.lang))
            .collect(),
    }))
}

// ============================================================================
// Concepts
// ============================================================================

/// List the concepts of a concept scheme.
#[utoipa::path(
    get,
    path = "/api/v1/concepts",
    params(SchemeQuery),
    responses(
        (status = 200, description = "Concepts of the scheme", body = ConceptsResponse),
        (status = 404, description = "Concept scheme not found")
    ),
    tag = "Concepts"
)]
pub async fn list_concepts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SchemeQuery>,
) -> Result<Json<ConceptsResponse>, ApiError> {
    let pool = state.db.pool();
    db::get_concept_scheme(pool, &query.concept_scheme_iri)
        .await?
        .ok_or_else(|| ApiError::SchemeNotFound(query.concept_scheme_iri.clone()))?;

    let concepts = db::get_concepts_in_scheme(pool, &query.concept_scheme_iri).await?;
    Ok(Json(ConceptsResponse {
        concepts: concepts
            .iter()
            .map(|concept| ConceptResponse::from_concept(concept, &query.lang))
            .collect(),
    }))
}

/// Get one concept with its schemes and relations.
#[utoipa::path(
    get,
    path = "/api/v1/concept",
    params(ConceptQuery),
    responses(
        (status = 200, description = "Concept with schemes and relations", body = FullConceptResponse),
        (status = 404, description = "Concept not found")
    ),
    tag = "Concepts"
)]
pub async fn get_concept(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConceptQuery>,
) -> Result<Json<FullConceptResponse>, ApiError> {
    let pool = state.db.pool();
    let concept = db::get_concept(pool, &query.concept_iri)
        .await?
        .ok_or_else(|| ApiError::ConceptNotFound(query.concept_iri.clone()))?;

    let concept_schemes = db::get_scheme_iris_of_member(pool, &concept.iri).await?;
    let relations = db::get_relations(pool, &concept.iri).await?;

    Ok(Json(FullConceptResponse {
        concept: ConceptResponse::from_concept(&concept, &query.lang),
        concept_schemes,
        relations: relations.iter().map(RelationResponse::from).collect(),
    }))
}

// ============================================================================
// Collections
// ============================================================================

/// List the collections of a concept scheme.
#[utoipa::path(
    get,
    path = "/api/v1/collections",
    params(SchemeQuery),
    responses(
        (status = 200, description = "Collections of the scheme", body = [EntityResponse]),
        (status = 404, description = "Concept scheme not found")
    ),
    tag = "Collections"
)]
pub async fn list_collections(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SchemeQuery>,
) -> Result<Json<Vec<EntityResponse>>, ApiError> {
    let pool = state.db.pool();
    db::get_concept_scheme(pool, &query.concept_scheme_iri)
        .await?
        .ok_or_else(|| ApiError::SchemeNotFound(query.concept_scheme_iri.clone()))?;

    let collections = db::get_collections_in_scheme(pool, &query.concept_scheme_iri).await?;
    Ok(Json(
        collections
            .iter()
            .map(|collection| EntityResponse::from_collection(collection, &query.lang))
            .collect(),
    ))
}

/// Get one collection with its member collections and concepts.
#[utoipa::path(
    get,
    path = "/api/v1/collection",
    params(CollectionQuery),
    responses(
        (status = 200, description = "Collection with members", body = CollectionResponse),
        (status = 404, description = "Collection not found")
    ),
    tag = "Collections"
)]
pub async fn get_collection(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CollectionQuery>,
) -> Result<Json<CollectionResponse>, ApiError> {
    let pool = state.db.pool();
    let collection = db::get_collection(pool, &query.collection_iri)
        .await?
        .ok_or_else(|| ApiError::CollectionNotFound(query.collection_iri.clone()))?;

    let sub_collections = db::get_collections_in_collection(pool, &collection.iri).await?;
    let concepts = db::get_concepts_in_collection(pool, &collection.iri).await?;

    Ok(Json(CollectionResponse {
        collection: EntityResponse::from_collection(&collection, &query.lang),
        collections: sub_collections
            .iter()
            .map(|sub| EntityResponse::from_collection(sub, &query.lang))
            .collect(),
        concepts: concepts
            .iter()
            .map(|concept| ConceptResponse::from_concept(concept, &query.lang))
            .collect(),
    }))
}

// ============================================================================
// Search
// ============================================================================

/// Search concepts by preferred label.
#[utoipa::path(
    get,
    path = "/api/v1/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching concepts", body = [ConceptResponse])
    ),
    tag = "Search"
)]
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ConceptResponse>>, ApiError> {
    let concepts =
        db::search_concepts(state.db.pool(), &query.search_term, &query.lang).await?;
    Ok(Json(
        concepts
            .iter()
            .map(|concept| ConceptResponse::from_concept(concept, &query.lang))
            .collect(),
    ))
}

// ============================================================================
// Dataset Ingestion
// ============================================================================

/// Download and ingest the dataset catalog. Requires a valid API key.
#[utoipa::path(
    post,
    path = "/api/v1/init_datasets",
    params(InitDatasetsQuery),
    responses(
        (status = 200, description = "Ingestion report", body = InitDatasetsResponse),
        (status = 403, description = "Missing or invalid API key")
    ),
    tag = "Datasets"
)]
pub async fn init_datasets(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<InitDatasetsQuery>,
) -> Result<Json<InitDatasetsResponse>, ApiError> {
    require_api_key(&headers, &state.config.secrets.api_key)?;

    let response = state
        .ingestor
        .run(state.db.pool(), query.reload)
        .await
        .map_err(|err| ApiError::Database(err.to_string()))?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn test_get_version_reports_crate_version() {
        let Json(version) = get_version().await;
        assert_eq!(version.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_get_status_redirects_to_status_page() {
        let response = get_status().await.into_response();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response
                .headers()
                .get("location")
                .and_then(|value| value.to_str().ok()),
            Some(STATUS_PAGE_URL)
        );
    }
}
