use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

const MAX_CONNECTIONS: u32 = 10;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Creates the PostgreSQL pool backing the internal job store.
///
/// With `lazy`, no connection is opened until the first query, so the service
/// can start against fixture postings without a reachable database.
pub async fn create_pool(database_url: &str, lazy: bool) -> Result<PgPool> {
    let options = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT);

    if lazy {
        info!("PostgreSQL pool created lazily");
        return options
            .connect_lazy(database_url)
            .context("DATABASE_URL is not a valid connection string");
    }

    info!("Connecting to PostgreSQL...");
    let pool = options
        .connect(database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}
