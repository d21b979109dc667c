//! Fixture postings for local development (`USE_FIXTURE_JOBS=true`).

use async_trait::async_trait;

use crate::models::posting::{Posting, PostingOrigin, SalaryRange};
use crate::sources::{PostingQuery, PostingSource, SourceError};

pub struct FixtureSource;

#[async_trait]
impl PostingSource for FixtureSource {
    fn name(&self) -> &str {
        "fixtures"
    }

    async fn fetch(&self, query: &PostingQuery) -> Result<Vec<Posting>, SourceError> {
        let location = query.location.as_deref().map(str::to_lowercase);
        Ok(fixture_postings()
            .into_iter()
            .filter(|p| match &location {
                Some(loc) => p.location.to_lowercase().contains(loc.as_str()),
                None => true,
            })
            .take(query.effective_limit())
            .collect())
    }
}

pub fn fixture_postings() -> Vec<Posting> {
    vec![
        fixture(
            "fixture-1",
            "Frontend Developer",
            "Tech Corp",
            "San Francisco, CA",
            false,
            &["React", "JavaScript", "CSS", "HTML"],
            (80_000, 120_000),
        ),
        fixture(
            "fixture-2",
            "Full Stack Engineer",
            "Startup Inc",
            "Remote",
            true,
            &["Node.js", "React", "MongoDB", "JavaScript"],
            (70_000, 100_000),
        ),
        fixture(
            "fixture-3",
            "Python Developer",
            "Data Solutions",
            "New York, NY",
            false,
            &["Python", "Machine Learning", "Data Analysis", "SQL"],
            (90_000, 130_000),
        ),
    ]
}

fn fixture(
    id: &str,
    title: &str,
    company: &str,
    location: &str,
    remote: bool,
    skills: &[&str],
    (min, max): (i64, i64),
) -> Posting {
    Posting {
        id: id.to_string(),
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        remote,
        required_skills: skills.iter().map(|s| s.to_string()).collect(),
        salary: Some(SalaryRange {
            min: Some(min),
            max: Some(max),
            currency: "USD".to_string(),
        }),
        origin: PostingOrigin::Fixture,
        url: Some(format!("https://example.com/jobs/{id}")),
        posted_at: None,
    }
}
