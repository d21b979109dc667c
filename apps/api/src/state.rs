use crate::analysis_client::AnalysisClient;
use crate::config::Config;
use crate::matching::MatchLimit;
use crate::sources::internal::InternalStore;
use crate::sources::SourceSet;

/// Shared application state injected into all route handlers via Axum extractors.
/// Every collaborator is constructed once in `main` and passed in here.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Sources fanned out to for ranking and listing.
    pub sources: SourceSet,
    /// Direct lookups for the resume → one posting flow.
    pub store: InternalStore,
    pub analysis: AnalysisClient,
    /// Validated `config.default_match_limit`.
    pub default_limit: MatchLimit,
}
