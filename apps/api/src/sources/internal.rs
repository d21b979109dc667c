use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::models::posting::{JobRow, Posting};
use crate::sources::{PostingQuery, PostingSource, SourceError};

const JOB_COLUMNS: &str = "id, title, company_name, location_city, location_remote, \
     required_skills, salary_min, salary_max, salary_currency, url, created_at";

/// Postings stored in our own Postgres `jobs` table.
///
/// Keywords are not used to prefilter: the ranking pass decides what matches,
/// and an exact-value SQL filter would hide substring-equivalent skills.
#[derive(Clone)]
pub struct InternalStore {
    db: PgPool,
}

impl InternalStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Looks up one posting by id, active or not.
    pub async fn find_posting(&self, id: Uuid) -> Result<Option<Posting>, sqlx::Error> {
        let row = sqlx::query_as::<_, JobRow>(&format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.db)
            .await?;
        Ok(row.map(Posting::from))
    }
}

#[async_trait]
impl PostingSource for InternalStore {
    fn name(&self) -> &str {
        "internal"
    }

    async fn fetch(&self, query: &PostingQuery) -> Result<Vec<Posting>, SourceError> {
        let limit = i64::try_from(query.effective_limit()).unwrap_or(i64::MAX);

        // Newest first: ranking ties keep this order.
        let rows = sqlx::query_as::<_, JobRow>(&format!(
            r#"
            SELECT {JOB_COLUMNS}
            FROM jobs
            WHERE status = 'active'
              AND ($1::text IS NULL OR location_city ILIKE '%' || $1 || '%')
            ORDER BY created_at DESC
            LIMIT $2
            "#
        ))
        .bind(query.location.as_deref())
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        debug!("Internal store returned {} active jobs", rows.len());
        Ok(rows.into_iter().map(Posting::from).collect())
    }
}
