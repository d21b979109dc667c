use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version, and the configured posting sources.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "jobmatch-api",
        "sources": state.sources.names(),
        "fixture_jobs": state.config.use_fixture_jobs,
    }))
}

/// GET /health/analysis
/// Reports whether the resume analysis service is reachable.
pub async fn analysis_health_handler(State(state): State<AppState>) -> Json<Value> {
    let healthy = state.analysis.health().await;
    Json(json!({
        "service": "resume-analysis",
        "healthy": healthy,
    }))
}
