use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Where a posting was fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostingOrigin {
    Internal,
    JobBoard,
    Fixture,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub currency: String,
}

/// A job posting as supplied by a source. Read-only during a scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub remote: bool,
    /// Declared order is preserved; matching skills are reported in this order.
    pub required_skills: Vec<String>,
    pub salary: Option<SalaryRange>,
    pub origin: PostingOrigin,
    pub url: Option<String>,
    pub posted_at: Option<DateTime<Utc>>,
}

/// Row of the `jobs` table in the internal store.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub company_name: String,
    pub location_city: Option<String>,
    pub location_remote: bool,
    pub required_skills: Vec<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub salary_currency: Option<String>,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<JobRow> for Posting {
    fn from(row: JobRow) -> Self {
        let salary = match (row.salary_min, row.salary_max) {
            (None, None) => None,
            (min, max) => Some(SalaryRange {
                min,
                max,
                currency: row.salary_currency.unwrap_or_else(|| "USD".to_string()),
            }),
        };

        Posting {
            id: row.id.to_string(),
            title: row.title,
            company: row.company_name,
            location: row.location_city.unwrap_or_default(),
            remote: row.location_remote,
            required_skills: row.required_skills,
            salary,
            origin: PostingOrigin::Internal,
            url: row.url,
            posted_at: Some(row.created_at),
        }
    }
}
