//! Axum route handlers for the Jobs API.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::ranking::{rank, MatchResult};
use crate::matching::scorer::{score_specific, DenominatorMode};
use crate::matching::{MatchLimit, SkillSet};
use crate::models::posting::Posting;
use crate::sources::fixtures::fixture_postings;
use crate::sources::PostingQuery;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchSkillsQuery {
    /// Comma-separated skill names.
    pub skills: Option<String>,
    pub location: Option<String>,
    /// Parsed in the handler so malformed values get the JSON error body.
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MatchSkillsResponse<'a> {
    pub jobs: Vec<MatchResult<'a>>,
    pub total_found: usize,
    pub skills_searched: &'a [String],
    pub failed_sources: &'a [String],
}

#[derive(Debug, Deserialize)]
pub struct ListJobsQuery {
    pub location: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListJobsResponse {
    pub jobs: Vec<Posting>,
    pub failed_sources: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct FitRequest {
    pub skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct FitResponse {
    pub posting_id: String,
    pub match_score: u32,
    pub matching_skills: Vec<String>,
    pub mode: DenominatorMode,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/jobs/match-skills?skills=a,b&location=&limit=
///
/// Ranks postings from every source against the given skills.
pub async fn handle_match_skills(
    State(state): State<AppState>,
    Query(params): Query<MatchSkillsQuery>,
) -> Result<Response, AppError> {
    let raw = params
        .skills
        .ok_or_else(|| AppError::Validation("skills parameter is required".to_string()))?;
    let skills = SkillSet::parse(raw.split(','))?;
    let limit = MatchLimit::resolve(params.limit.as_deref(), state.default_limit)?;

    let query = PostingQuery {
        keywords: skills.as_slice().to_vec(),
        location: params.location,
        limit: None,
    };
    let pool = state.sources.fetch_all(&query).await?;

    let ranking = rank(&skills, &pool.postings, limit);
    info!(
        "Ranked {} postings for {} skills: {} matched",
        pool.postings.len(),
        skills.len(),
        ranking.total_found
    );

    let response = MatchSkillsResponse {
        jobs: ranking.matches,
        total_found: ranking.total_found,
        skills_searched: skills.as_slice(),
        failed_sources: &pool.failed_sources,
    };
    Ok(Json(&response).into_response())
}

/// GET /api/v1/jobs?location=&limit=
///
/// Unranked listing across all sources. This is the fallback for callers
/// without a skill set.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(params): Query<ListJobsQuery>,
) -> Result<Json<ListJobsResponse>, AppError> {
    let limit = MatchLimit::resolve(params.limit.as_deref(), state.default_limit)?;

    let query = PostingQuery {
        keywords: vec![],
        location: params.location,
        limit: Some(limit.get()),
    };
    let mut pool = state.sources.fetch_all(&query).await?;
    pool.postings.truncate(limit.get());

    Ok(Json(ListJobsResponse {
        jobs: pool.postings,
        failed_sources: pool.failed_sources,
    }))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Posting>, AppError> {
    Ok(Json(find_posting(&state, &id).await?))
}

/// POST /api/v1/jobs/:id/fit
///
/// Scores a candidate against one stored posting, normalized by the
/// posting's own requirement count.
pub async fn handle_fit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<FitRequest>,
) -> Result<Json<FitResponse>, AppError> {
    let skills = SkillSet::parse(&request.skills)?;
    let posting = find_posting(&state, &id).await?;

    let required = SkillSet::from_required(&posting.required_skills);
    let scored = score_specific(&skills, &required);

    Ok(Json(FitResponse {
        posting_id: posting.id,
        match_score: scored.score,
        matching_skills: scored.matching_skills,
        mode: DenominatorMode::SpecificPosting,
    }))
}

/// Resolves a posting id against the fixtures in fixture mode, otherwise
/// against the internal store (which keys postings by UUID).
async fn find_posting(state: &AppState, id: &str) -> Result<Posting, AppError> {
    let not_found = || AppError::NotFound(format!("Job {id} not found"));

    if state.config.use_fixture_jobs {
        return fixture_postings()
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(not_found);
    }

    let uuid = Uuid::parse_str(id)
        .map_err(|_| AppError::Validation(format!("'{id}' is not a valid job id")))?;
    state.store.find_posting(uuid).await?.ok_or_else(not_found)
}
