pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::ats::handlers as resume_handlers;
use crate::matching::handlers as job_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/health/analysis", get(health::analysis_health_handler))
        // Jobs API
        .route("/api/v1/jobs", get(job_handlers::handle_list_jobs))
        .route(
            "/api/v1/jobs/match-skills",
            get(job_handlers::handle_match_skills),
        )
        .route("/api/v1/jobs/:id", get(job_handlers::handle_get_job))
        .route("/api/v1/jobs/:id/fit", post(job_handlers::handle_fit))
        // Resume API
        .route(
            "/api/v1/resumes/analyze",
            post(resume_handlers::handle_analyze),
        )
        .route(
            "/api/v1/resumes/ats-score",
            post(resume_handlers::handle_ats_score),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::analysis_client::AnalysisClient;
    use crate::ats::engine::LIMITED_ANALYSIS;
    use crate::config::Config;
    use crate::matching::MatchLimit;
    use crate::sources::fixtures::FixtureSource;
    use crate::sources::internal::InternalStore;
    use crate::sources::tests::FailingSource;
    use crate::sources::SourceSet;

    fn test_state(sources: SourceSet) -> AppState {
        // Never connects: only the stored-posting endpoints touch the pool.
        let db = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/jobmatch_test")
            .unwrap();

        AppState {
            config: Config {
                database_url: "postgres://localhost/jobmatch_test".to_string(),
                analysis_service_url: "http://127.0.0.1:9".to_string(),
                job_board_url: None,
                use_fixture_jobs: true,
                source_timeout_secs: 5,
                analysis_max_retries: 1,
                default_match_limit: 10,
                port: 0,
                rust_log: "debug".to_string(),
            },
            sources,
            store: InternalStore::new(db),
            analysis: AnalysisClient::new("http://127.0.0.1:9".to_string())
                .unwrap()
                .with_max_retries(1),
            default_limit: MatchLimit::default(),
        }
    }

    fn fixture_router() -> Router {
        let sources = SourceSet::new(Duration::from_secs(5)).with_source(Arc::new(FixtureSource));
        build_router(test_state(sources))
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_lists_sources() {
        let (status, body) = send(fixture_router(), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sources"], json!(["fixtures"]));
    }

    #[tokio::test]
    async fn test_match_skills_ranks_and_truncates() {
        let (status, body) = send(
            fixture_router(),
            get("/api/v1/jobs/match-skills?skills=React,JavaScript,CSS,HTML&limit=1"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_found"], 2);
        let jobs = body["jobs"].as_array().unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0]["id"], "fixture-1");
        assert_eq!(jobs[0]["match_score"], 100);
        assert_eq!(
            body["skills_searched"],
            json!(["React", "JavaScript", "CSS", "HTML"])
        );
    }

    #[tokio::test]
    async fn test_match_skills_applies_location_filter() {
        let (status, body) = send(
            fixture_router(),
            get("/api/v1/jobs/match-skills?skills=React&location=remote"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let jobs = body["jobs"].as_array().unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0]["id"], "fixture-2");
        assert_eq!(jobs[0]["matching_skills"], json!(["React"]));
    }

    #[tokio::test]
    async fn test_match_skills_without_matches_is_empty_not_error() {
        let (status, body) =
            send(fixture_router(), get("/api/v1/jobs/match-skills?skills=Haskell")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["jobs"], json!([]));
        assert_eq!(body["total_found"], 0);
    }

    #[tokio::test]
    async fn test_match_skills_requires_skills() {
        let (status, body) = send(fixture_router(), get("/api/v1/jobs/match-skills")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_match_skills_rejects_empty_skill_entry() {
        let (status, _) = send(
            fixture_router(),
            get("/api/v1/jobs/match-skills?skills=React,,Go"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_match_skills_rejects_non_positive_limit() {
        for limit in ["0", "-3"] {
            let (status, _) = send(
                fixture_router(),
                get(&format!("/api/v1/jobs/match-skills?skills=React&limit={limit}")),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "limit={limit}");
        }
    }

    #[tokio::test]
    async fn test_non_integer_limit_gets_json_validation_error() {
        for uri in [
            "/api/v1/jobs/match-skills?skills=React&limit=abc",
            "/api/v1/jobs?limit=abc",
        ] {
            let (status, body) = send(fixture_router(), get(uri)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR", "{uri}");
        }
    }

    #[tokio::test]
    async fn test_get_job_resolves_fixture_ids_in_fixture_mode() {
        let (status, body) = send(fixture_router(), get("/api/v1/jobs/fixture-2")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Full Stack Engineer");

        let (status, body) = send(fixture_router(), get("/api/v1/jobs/fixture-9")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_fit_scores_fixture_posting_by_required_count() {
        let (status, body) = send(
            fixture_router(),
            post_json(
                "/api/v1/jobs/fixture-1/fit",
                json!({ "skills": ["React", "CSS", "Rust", "Go", "Kotlin"] }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        // 2 of 4 required skills; the candidate's list length does not count.
        assert_eq!(body["match_score"], 50);
        assert_eq!(body["matching_skills"], json!(["React", "CSS"]));
        assert_eq!(body["mode"], "specific_posting");
    }

    #[tokio::test]
    async fn test_all_sources_down_is_service_unavailable() {
        let sources = SourceSet::new(Duration::from_secs(5))
            .with_source(Arc::new(FailingSource("job_board")));
        let router = build_router(test_state(sources));

        let (status, body) = send(router, get("/api/v1/jobs/match-skills?skills=React")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "SOURCE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_partial_source_failure_is_reported() {
        let sources = SourceSet::new(Duration::from_secs(5))
            .with_source(Arc::new(FailingSource("job_board")))
            .with_source(Arc::new(FixtureSource));
        let router = build_router(test_state(sources));

        let (status, body) = send(router, get("/api/v1/jobs/match-skills?skills=Python")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["failed_sources"], json!(["job_board"]));
        assert_eq!(body["jobs"][0]["id"], "fixture-3");
    }

    #[tokio::test]
    async fn test_list_jobs_is_unranked_and_limited() {
        let (status, body) = send(fixture_router(), get("/api/v1/jobs?limit=2")).await;
        assert_eq!(status, StatusCode::OK);
        let jobs = body["jobs"].as_array().unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0]["id"], "fixture-1");
        assert!(jobs[0].get("match_score").is_none());
    }

    #[tokio::test]
    async fn test_analyze_degrades_when_service_unreachable() {
        let (status, body) = send(
            fixture_router(),
            post_json("/api/v1/resumes/analyze", json!({ "text": "Jane Doe, Rust engineer" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["degraded"], true);
        assert_eq!(body["analysis"]["status"], "completed");
        assert_eq!(body["analysis"]["ats_score"], 75.0);
        assert_eq!(body["analysis"]["recommendations"], json!([LIMITED_ANALYSIS]));
    }

    #[tokio::test]
    async fn test_analyze_rejects_empty_text() {
        let (status, _) = send(
            fixture_router(),
            post_json("/api/v1/resumes/analyze", json!({ "text": "   " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_ats_score_on_empty_analysis_is_baseline() {
        let (status, body) = send(
            fixture_router(),
            post_json("/api/v1/resumes/ats-score", json!({ "analysis": {} })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 75);
        assert!(!body["recommendations"].as_array().unwrap().is_empty());
    }
}
