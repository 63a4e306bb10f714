//! DDS Glossary Server
//!
//! REST API server for the SKOS glossary backed by PostgreSQL.

use dds_glossary::api::create_router;
use dds_glossary::config::Config;
use dds_glossary::db::DatabasePool;
use dds_glossary::state::AppState;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use dds_glossary::models::{
    CollectionResponse, ConceptResponse, ConceptSchemeResponse, ConceptsResponse, DatasetReport,
    EntityResponse, FailedDatasetReport, FullConceptResponse, FullConceptSchemeResponse,
    InitDatasetsResponse, RelationResponse, VersionResponse,
};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        dds_glossary::api::handlers::get_version,
        dds_glossary::api::handlers::get_status,
        dds_glossary::api::handlers::list_schemes,
        dds_glossary::api::handlers::get_scheme,
        dds_glossary::api::handlers::list_concepts,
        dds_glossary::api::handlers::get_concept,
        dds_glossary::api::handlers::list_collections,
        dds_glossary::api::handlers::get_collection,
        dds_glossary::api::handlers::search,
        dds_glossary::api::handlers::init_datasets,
    ),
    components(
        schemas(
            VersionResponse,
            ConceptSchemeResponse,
            FullConceptSchemeResponse,
            EntityResponse,
            ConceptResponse,
            ConceptsResponse,
            FullConceptResponse,
            CollectionResponse,
            RelationResponse,
            InitDatasetsResponse,
            DatasetReport,
            FailedDatasetReport,
        )
    ),
    tags(
        (name = "Health", description = "Health and version endpoints"),
        (name = "Schemes", description = "Concept scheme browsing"),
        (name = "Concepts", description = "Concept browsing"),
        (name = "Collections", description = "Collection browsing"),
        (name = "Search", description = "Label search"),
        (name = "Datasets", description = "Dataset ingestion"),
    ),
    info(
        title = "DDS Glossary API",
        version = "0.2.0",
        description = "REST API for browsing SKOS glossaries",
        license(name = "MIT")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration; fall back to defaults when no file is present
    let config_path =
        std::env::var("GLOSSARY_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let config = if std::path::Path::new(&config_path).exists() {
        info!("Loading configuration from {}", config_path);
        Config::load(&config_path)?
    } else {
        Config::from_env()?
    };

    if config.secrets.sentry_dsn.is_some() {
        info!("SENTRY_DSN provided; error reporting handled by the deployment");
    }

    // Connect to the database and apply migrations
    let db = DatabasePool::new(&config.secrets.database_url, &config.database).await?;
    db.run_migrations().await?;

    let host = config.server.host.clone();
    let port = config.server.port;

    // Create application state
    let state = Arc::new(AppState::new(config, db)?);

    info!("Starting DDS Glossary server on {}:{}", host, port);
    info!("Swagger UI available at http://{}:{}/swagger-ui/", host, port);

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = create_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start the server
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
