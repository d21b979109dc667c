mod analysis_client;
mod ats;
mod config;
mod db;
mod errors;
mod matching;
mod models;
mod routes;
mod sources;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis_client::AnalysisClient;
use crate::config::Config;
use crate::db::create_pool;
use crate::matching::MatchLimit;
use crate::routes::build_router;
use crate::sources::fixtures::FixtureSource;
use crate::sources::internal::InternalStore;
use crate::sources::job_board::JobBoardClient;
use crate::sources::SourceSet;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobMatch API v{}", env!("CARGO_PKG_VERSION"));

    let default_limit = MatchLimit::new(config.default_match_limit)?;

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url, config.use_fixture_jobs).await?;
    let store = InternalStore::new(db);

    // Posting sources: fixtures replace the real sources in development
    let mut sources = SourceSet::new(Duration::from_secs(config.source_timeout_secs));
    if config.use_fixture_jobs {
        sources = sources.with_source(Arc::new(FixtureSource));
    } else {
        sources = sources.with_source(Arc::new(store.clone()));
        if let Some(url) = &config.job_board_url {
            sources = sources.with_source(Arc::new(JobBoardClient::new(url.clone())?));
        }
    }
    info!(
        "Posting sources: [{}] (timeout {}s each)",
        sources.names().join(", "),
        config.source_timeout_secs
    );

    // Initialize analysis service client
    let analysis = AnalysisClient::new(config.analysis_service_url.clone())?
        .with_max_retries(config.analysis_max_retries);
    info!(
        "Analysis client initialized ({}, {} attempts)",
        config.analysis_service_url, config.analysis_max_retries
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        sources,
        store,
        analysis,
        default_limit,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed domain

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
