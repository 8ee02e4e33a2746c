mod catalog;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod persistence;
mod render;
mod reviews;
mod routes;
mod sessions;
mod state;
mod timetable;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::{CatalogProvider, LlmCatalogProvider, StaticCatalogProvider};
use crate::config::{CatalogBackend, Config};
use crate::db::{create_pool, ensure_schema};
use crate::llm_client::LlmClient;
use crate::persistence::PgScheduleStore;
use crate::reviews::{
    KeywordReviewAnalyzer, LlmReviewAnalyzer, ReviewAnalyzer, ReviewStore, StaticReviewStore,
};
use crate::routes::build_router;
use crate::sessions::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting planner v{}", env!("CARGO_PKG_VERSION"));

    // PostgreSQL
    let db = create_pool(&config.database_url).await?;
    ensure_schema(&db).await?;

    // S3 / MinIO for rendered timetables
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized");

    let reviews: Arc<dyn ReviewStore> = Arc::new(StaticReviewStore::seeded());

    let catalog: Arc<dyn CatalogProvider>;
    let review_analyzer: Arc<dyn ReviewAnalyzer>;
    match config.catalog_backend {
        CatalogBackend::Llm => {
            let llm = LlmClient::new(config.anthropic_api_key.clone())?;
            info!("Catalog backend: LLM (model: {})", llm_client::MODEL);
            catalog = Arc::new(LlmCatalogProvider::new(llm.clone(), Arc::clone(&reviews)));
            review_analyzer = Arc::new(LlmReviewAnalyzer::new(llm));
        }
        CatalogBackend::Static => {
            info!("Catalog backend: static sample");
            catalog = Arc::new(StaticCatalogProvider::sample());
            review_analyzer = Arc::new(KeywordReviewAnalyzer);
        }
    }

    let state = AppState {
        sessions: SessionStore::new(config.session_capacity),
        catalog,
        store: Arc::new(PgScheduleStore::new(db, s3, config.s3_bucket.clone())),
        reviews,
        review_analyzer,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "planner-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
