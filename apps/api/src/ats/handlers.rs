//! Axum route handlers for the Resume API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ats::engine::{compute_score, finalize, AtsResult};
use crate::errors::AppError;
use crate::models::analysis::ResumeAnalysis;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis: ResumeAnalysis,
    /// True when the analysis service could not be used and the baseline applies.
    pub degraded: bool,
}

#[derive(Debug, Deserialize)]
pub struct AtsScoreRequest {
    pub analysis: ResumeAnalysis,
}

/// POST /api/v1/resumes/analyze
///
/// Runs resume text through the analysis service and scores it. An analysis
/// failure never fails the request: the resume gets the baseline score.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let (analysis, degraded) = match state.analysis.analyze_text(&request.text).await {
        Ok(analysis) => (analysis, false),
        Err(e) => {
            warn!("Resume analysis failed, applying baseline: {e}");
            (ResumeAnalysis::failed(), true)
        }
    };

    let analysis = finalize(analysis);
    info!(
        "Resume scored: ats_score={:?}, {} recommendations",
        analysis.ats_score,
        analysis.recommendations.len()
    );

    Ok(Json(AnalyzeResponse { analysis, degraded }))
}

/// POST /api/v1/resumes/ats-score
///
/// Scores an analysis record produced elsewhere.
pub async fn handle_ats_score(Json(request): Json<AtsScoreRequest>) -> Json<AtsResult> {
    Json(compute_score(&request.analysis))
}
