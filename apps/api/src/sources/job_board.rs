//! External job-board adapter.
//!
//! Board records carry a free-text description instead of a skill list, so
//! required skills are derived from a fixed vocabulary of common technologies.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::models::posting::{Posting, PostingOrigin};
use crate::sources::{PostingQuery, PostingSource, SourceError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Vocabulary checked against board descriptions, in reporting order.
const COMMON_SKILLS: &[&str] = &[
    "JavaScript",
    "Python",
    "Java",
    "React",
    "Node.js",
    "Angular",
    "Vue",
    "MongoDB",
    "PostgreSQL",
    "MySQL",
    "AWS",
    "Azure",
    "Docker",
    "Kubernetes",
    "Git",
    "Jenkins",
    "Jira",
    "TypeScript",
    "PHP",
    "Ruby",
    "Go",
    "Rust",
];

#[derive(Debug, Deserialize)]
struct BoardJob {
    id: String,
    title: String,
    company: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    description: String,
    url: Option<String>,
    /// RFC 3339 when present; other formats are ignored.
    #[serde(default)]
    created_at: Option<String>,
}

#[derive(Clone)]
pub struct JobBoardClient {
    client: Client,
    base_url: String,
}

impl JobBoardClient {
    pub fn new(base_url: String) -> Result<Self, SourceError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            base_url,
        })
    }
}

#[async_trait]
impl PostingSource for JobBoardClient {
    fn name(&self) -> &str {
        "job_board"
    }

    async fn fetch(&self, query: &PostingQuery) -> Result<Vec<Posting>, SourceError> {
        let description = if query.keywords.is_empty() {
            "developer".to_string()
        } else {
            query.keywords.join(" ")
        };

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("description", description.as_str()),
                ("location", query.location.as_deref().unwrap_or("")),
                ("full_time", "false"),
                ("page", "0"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let jobs: Vec<BoardJob> = response.json().await?;
        debug!("Job board returned {} postings", jobs.len());

        Ok(jobs
            .into_iter()
            .take(query.effective_limit())
            .map(into_posting)
            .collect())
    }
}

fn into_posting(job: BoardJob) -> Posting {
    let posted_at = job
        .created_at
        .as_deref()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|ts| ts.with_timezone(&Utc));

    Posting {
        remote: job.location.to_lowercase().contains("remote"),
        required_skills: extract_skills_from_description(&job.description),
        id: job.id,
        title: job.title,
        company: job.company,
        location: job.location,
        salary: None,
        origin: PostingOrigin::JobBoard,
        url: job.url,
        posted_at,
    }
}

/// Vocabulary skills mentioned anywhere in `description` (case-insensitive).
pub fn extract_skills_from_description(description: &str) -> Vec<String> {
    let description = description.to_lowercase();
    COMMON_SKILLS
        .iter()
        .filter(|skill| description.contains(&skill.to_lowercase()))
        .map(|skill| skill.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_skills_in_vocabulary_order() {
        let skills =
            extract_skills_from_description("Rust and docker experience; Python a plus. AWS.");
        assert_eq!(skills, vec!["Python", "AWS", "Docker", "Rust"]);
    }

    #[test]
    fn test_extraction_is_substring_based() {
        // "JavaScript" also contains "Java"; both are reported.
        let skills = extract_skills_from_description("Senior JavaScript engineer");
        assert_eq!(skills, vec!["JavaScript", "Java"]);
    }

    #[test]
    fn test_empty_description_yields_no_skills() {
        assert!(extract_skills_from_description("").is_empty());
    }

    #[test]
    fn test_board_job_maps_to_posting() {
        let job: BoardJob = serde_json::from_str(
            r#"{
                "id": "gh-42",
                "title": "Platform Engineer",
                "company": "Hooli",
                "location": "Remote (US)",
                "description": "Kubernetes, Go and Terraform",
                "url": "https://jobs.example.com/42",
                "created_at": "2024-03-01T09:30:00Z"
            }"#,
        )
        .unwrap();

        let posting = into_posting(job);
        assert_eq!(posting.id, "gh-42");
        assert!(posting.remote);
        assert_eq!(posting.required_skills, vec!["Kubernetes", "Go"]);
        assert_eq!(posting.origin, PostingOrigin::JobBoard);
        assert!(posting.salary.is_none());
        assert_eq!(
            posting.posted_at.map(|ts| ts.to_rfc3339()),
            Some("2024-03-01T09:30:00+00:00".to_string())
        );
    }

    #[test]
    fn test_board_job_tolerates_missing_optional_fields() {
        let job: BoardJob =
            serde_json::from_str(r#"{"id": "1", "title": "Dev", "company": "X"}"#).unwrap();
        let posting = into_posting(job);
        assert!(!posting.remote);
        assert!(posting.required_skills.is_empty());
        assert!(posting.posted_at.is_none());
    }

    #[test]
    fn test_unparseable_board_timestamp_is_dropped() {
        let job: BoardJob = serde_json::from_str(
            r#"{"id": "1", "title": "Dev", "company": "X", "created_at": "Mon Nov 04 2019"}"#,
        )
        .unwrap();
        assert!(into_posting(job).posted_at.is_none());
    }
}
