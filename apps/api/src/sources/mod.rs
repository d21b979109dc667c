//! Posting sources: everything that supplies postings to a ranking pass.
//!
//! Each backend implements `PostingSource`. `SourceSet` fans a query out to
//! every registered source concurrently, bounds each with a timeout, and
//! merges whatever came back. One slow or broken source degrades the pool,
//! it does not fail the request. Only when every source fails does the
//! caller get `AllSourcesFailed`, which is reported as "source unavailable"
//! and never as "no matches".

pub mod fixtures;
pub mod internal;
pub mod job_board;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use crate::models::posting::Posting;

/// Upper bound on postings requested from one source when the caller does not
/// set a limit (ranking passes want the whole pool, not a page of it).
pub const MAX_POOL_PER_SOURCE: usize = 200;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("source returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// Every registered source failed or timed out.
#[derive(Debug, Error)]
#[error("all posting sources unavailable: {}", failed_sources.join(", "))]
pub struct AllSourcesFailed {
    pub failed_sources: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PostingQuery {
    pub keywords: Vec<String>,
    pub location: Option<String>,
    /// `None` asks for up to `MAX_POOL_PER_SOURCE`.
    pub limit: Option<usize>,
}

impl PostingQuery {
    pub fn effective_limit(&self) -> usize {
        self.limit.unwrap_or(MAX_POOL_PER_SOURCE).min(MAX_POOL_PER_SOURCE)
    }
}

/// A supplier of postings. Implementations own their transport; they never
/// score or rank.
#[async_trait]
pub trait PostingSource: Send + Sync {
    /// Stable name used in logs and in `failed_sources`.
    fn name(&self) -> &str;

    async fn fetch(&self, query: &PostingQuery) -> Result<Vec<Posting>, SourceError>;
}

/// Merged result of a fan-out fetch.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    /// Postings in source registration order, then each source's own order.
    pub postings: Vec<Posting>,
    pub failed_sources: Vec<String>,
}

/// The set of configured sources. Cheap to clone.
#[derive(Clone)]
pub struct SourceSet {
    sources: Vec<Arc<dyn PostingSource>>,
    per_source_timeout: Duration,
}

impl SourceSet {
    pub fn new(per_source_timeout: Duration) -> Self {
        Self {
            sources: Vec::new(),
            per_source_timeout,
        }
    }

    pub fn with_source(mut self, source: Arc<dyn PostingSource>) -> Self {
        self.sources.push(source);
        self
    }

    pub fn names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Fetches from all sources concurrently and merges the successful batches.
    pub async fn fetch_all(&self, query: &PostingQuery) -> Result<FetchOutcome, AllSourcesFailed> {
        if self.sources.is_empty() {
            return Ok(FetchOutcome::default());
        }

        let mut set = JoinSet::new();
        for (index, source) in self.sources.iter().enumerate() {
            let source = Arc::clone(source);
            let query = query.clone();
            let timeout = self.per_source_timeout;
            set.spawn(async move {
                let result = match tokio::time::timeout(timeout, source.fetch(&query)).await {
                    Ok(result) => result,
                    Err(_) => Err(SourceError::Timeout(timeout)),
                };
                (index, result)
            });
        }

        let mut batches: Vec<Option<Vec<Posting>>> = (0..self.sources.len()).map(|_| None).collect();

        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, Ok(postings))) => {
                    debug!(
                        "Source '{}' returned {} postings",
                        self.sources[index].name(),
                        postings.len()
                    );
                    batches[index] = Some(postings);
                }
                Ok((index, Err(e))) => {
                    warn!("Source '{}' failed: {e}", self.sources[index].name());
                }
                Err(e) => {
                    error!("Source fetch task aborted: {e}");
                }
            }
        }

        let mut outcome = FetchOutcome::default();
        for (source, batch) in self.sources.iter().zip(batches) {
            match batch {
                Some(postings) => outcome.postings.extend(postings),
                None => outcome.failed_sources.push(source.name().to_string()),
            }
        }

        if outcome.failed_sources.len() == self.sources.len() {
            return Err(AllSourcesFailed {
                failed_sources: outcome.failed_sources,
            });
        }

        Ok(outcome)
    }
}
