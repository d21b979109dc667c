use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub analysis_service_url: String,
    /// External job board endpoint. The board source is disabled when unset.
    pub job_board_url: Option<String>,
    /// Serve fixture postings instead of the real sources (local development).
    pub use_fixture_jobs: bool,
    pub source_timeout_secs: u64,
    /// Attempts per analysis request, including the first.
    pub analysis_max_retries: u32,
    pub default_match_limit: i64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let default_match_limit: i64 = optional_env("MATCH_DEFAULT_LIMIT")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .context("MATCH_DEFAULT_LIMIT must be an integer")?;
        if default_match_limit <= 0 {
            bail!("MATCH_DEFAULT_LIMIT must be positive, got {default_match_limit}");
        }

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            analysis_service_url: optional_env("NLP_SERVICE_URL")
                .unwrap_or_else(|| "http://localhost:8000".to_string()),
            job_board_url: optional_env("JOB_BOARD_URL"),
            use_fixture_jobs: parse_flag(optional_env("USE_FIXTURE_JOBS").as_deref()),
            source_timeout_secs: parse_positive(
                "SOURCE_TIMEOUT_SECS",
                optional_env("SOURCE_TIMEOUT_SECS").as_deref(),
                10,
            )?,
            analysis_max_retries: parse_positive(
                "NLP_MAX_RETRIES",
                optional_env("NLP_MAX_RETRIES").as_deref(),
                3,
            )?,
            default_match_limit,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and empty are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parses a strictly positive integer setting, falling back to `default` when unset.
fn parse_positive<T>(key: &str, value: Option<&str>, default: T) -> Result<T>
where
    T: std::str::FromStr + Default + PartialOrd + std::fmt::Display,
{
    let Some(raw) = value else {
        return Ok(default);
    };
    let parsed: T = raw
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("{key} must be a positive integer, got '{raw}'"))?;
    if parsed <= T::default() {
        bail!("{key} must be positive, got {parsed}");
    }
    Ok(parsed)
}

fn parse_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}
