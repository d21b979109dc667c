/// Analysis Client: HTTP client for the resume analysis service.
///
/// The analysis service extracts skills, experience, education and contact
/// details from raw resume text and proposes an ATS score. This client is the
/// only place that talks to it. Retries live here; scoring never retries.
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::analysis::{
    AnalysisStatus, Contact, EducationEntry, Experience, ExperienceLevel, ExtractedSkill,
    ResumeAnalysis,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("analysis service error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("analysis service unavailable after {retries} attempts")]
    Exhausted { retries: u32 },
}

#[derive(Debug, Serialize)]
struct AnalyzeTextRequest<'a> {
    text: &'a str,
}

/// Raw analysis payload. Every field is optional; numeric fields are taken
/// as floats since the service does not guarantee integers.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AnalysisPayload {
    ats_score: Option<f64>,
    skills: Vec<ExtractedSkill>,
    experience: Option<ExperiencePayload>,
    education: Vec<EducationEntry>,
    contact: Contact,
    recommendations: Vec<String>,
    processing_time: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExperiencePayload {
    years: f64,
    level: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HealthPayload {
    status: String,
}

impl From<AnalysisPayload> for ResumeAnalysis {
    fn from(payload: AnalysisPayload) -> Self {
        let experience = payload.experience.map(|e| {
            let years = if e.years.is_finite() && e.years > 0.0 {
                e.years.floor() as u32
            } else {
                0
            };
            Experience {
                years,
                level: e.level.as_deref().and_then(parse_level),
            }
        });

        // Blank contact strings mean "not found".
        let contact = Contact {
            email: payload.contact.email.filter(|v| !v.trim().is_empty()),
            phone: payload.contact.phone.filter(|v| !v.trim().is_empty()),
            location: payload.contact.location.filter(|v| !v.trim().is_empty()),
        };

        ResumeAnalysis {
            status: AnalysisStatus::Completed,
            skills: payload.skills,
            experience,
            education: payload.education,
            contact,
            ats_score: payload.ats_score,
            recommendations: payload.recommendations,
        }
    }
}

fn parse_level(level: &str) -> Option<ExperienceLevel> {
    match level.trim().to_lowercase().as_str() {
        "junior" | "entry" => Some(ExperienceLevel::Junior),
        "mid" => Some(ExperienceLevel::Mid),
        "senior" | "lead" => Some(ExperienceLevel::Senior),
        _ => None,
    }
}

#[derive(Clone)]
pub struct AnalysisClient {
    client: Client,
    base_url: String,
    max_retries: u32,
}

impl AnalysisClient {
    pub fn new(base_url: String) -> Result<Self, AnalysisError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Sends raw resume text for analysis.
    /// Retries on transport errors, 429 and 5xx with exponential backoff.
    pub async fn analyze_text(&self, text: &str) -> Result<ResumeAnalysis, AnalysisError> {
        let url = format!("{}/analyze-text", self.base_url);
        let body = AnalyzeTextRequest { text };

        let mut last_error: Option<AnalysisError> = None;

        for attempt in 0..self.max_retries {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Analysis attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.post(&url).json(&body).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(AnalysisError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let message = response.text().await.unwrap_or_default();
                warn!("Analysis service returned {}: {}", status, message);
                last_error = Some(AnalysisError::Api {
                    status: status.as_u16(),
                    message,
                });
                continue;
            }

            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(AnalysisError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let payload: AnalysisPayload = response.json().await?;
            debug!(
                "Analysis succeeded: {} skills, processing_time={:?}s",
                payload.skills.len(),
                payload.processing_time
            );

            return Ok(payload.into());
        }

        Err(last_error.unwrap_or(AnalysisError::Exhausted {
            retries: self.max_retries,
        }))
    }

    /// True when the service reports itself healthy.
    pub async fn health(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => match response.json::<HealthPayload>().await {
                Ok(payload) => payload.status == "healthy",
                Err(e) => {
                    warn!("Analysis service health payload unreadable: {e}");
                    false
                }
            },
            Err(e) => {
                warn!("Analysis service health check failed: {e}");
                false
            }
        }
    }
}
