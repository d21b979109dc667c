//! ATS score aggregation and recommendation rules.
//!
//! The score itself comes from the analysis collaborator; this module only
//! clamps it, substitutes the baseline when it is missing, and derives
//! recommendations from the structured fields. Each rule fires at most once
//! per resume and only reads fields that are present.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::analysis::{AnalysisStatus, ExperienceLevel, ResumeAnalysis};

/// Score shown when no structured signal is available.
pub const BASELINE_SCORE: u32 = 75;

pub const LIMITED_ANALYSIS: &str = "Resume uploaded successfully. Analysis may be limited.";
const LOOKS_GOOD: &str = "Your resume looks good! Consider adding more specific achievements.";

const MIN_SKILLS: usize = 3;
const LOW_CONFIDENCE: f64 = 0.5;
const WEAK_SCORE: u32 = 70;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtsResult {
    pub score: u32, // 0 – 100
    pub recommendations: Vec<String>,
}

type Rule = fn(&ResumeAnalysis, u32) -> Option<String>;

const RULES: &[Rule] = &[
    sparse_skills,
    missing_experience,
    missing_education,
    missing_email,
    missing_phone,
    low_confidence_skills,
    weak_score,
];

pub fn compute_score(analysis: &ResumeAnalysis) -> AtsResult {
    if analysis.status == AnalysisStatus::Failed {
        return AtsResult {
            score: BASELINE_SCORE,
            recommendations: vec![LIMITED_ANALYSIS.to_string()],
        };
    }

    // A zero upstream score means the collaborator found nothing to score.
    let score = analysis
        .ats_score
        .filter(|s| *s != 0.0 && !s.is_nan())
        .map(clamp_score)
        .unwrap_or(BASELINE_SCORE);

    let mut recommendations = Recommendations::default();
    for upstream in &analysis.recommendations {
        recommendations.push(upstream.clone());
    }
    for rule in RULES {
        if let Some(message) = rule(analysis, score) {
            recommendations.push(message);
        }
    }
    if recommendations.is_empty() {
        recommendations.push(LOOKS_GOOD.to_string());
    }

    AtsResult {
        score,
        recommendations: recommendations.into_vec(),
    }
}

/// Applies the ATS result to the analysis and marks it completed.
pub fn finalize(mut analysis: ResumeAnalysis) -> ResumeAnalysis {
    let result = compute_score(&analysis);

    if let Some(experience) = analysis.experience.as_mut() {
        experience
            .level
            .get_or_insert(ExperienceLevel::from_years(experience.years));
    }

    analysis.ats_score = Some(f64::from(result.score));
    analysis.recommendations = result.recommendations;
    analysis.status = AnalysisStatus::Completed;
    analysis
}

fn clamp_score(raw: f64) -> u32 {
    raw.round().clamp(0.0, 100.0) as u32
}

/// Ordered, duplicate-free recommendation list.
#[derive(Default)]
struct Recommendations {
    seen: HashSet<String>,
    items: Vec<String>,
}

impl Recommendations {
    fn push(&mut self, message: String) {
        let message = message.trim().to_string();
        if message.is_empty() || !self.seen.insert(message.clone()) {
            return;
        }
        self.items.push(message);
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn into_vec(self) -> Vec<String> {
        self.items
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rules
// ────────────────────────────────────────────────────────────────────────────

fn sparse_skills(analysis: &ResumeAnalysis, _score: u32) -> Option<String> {
    let count = analysis.skill_names().len();
    (count < MIN_SKILLS).then(|| {
        format!(
            "Broaden your skills section: only {count} skill(s) were detected. List the tools and technologies you use."
        )
    })
}

fn missing_experience(analysis: &ResumeAnalysis, _score: u32) -> Option<String> {
    (analysis.years_of_experience() == 0).then(|| {
        "No years of experience could be detected. State your experience explicitly (e.g. \"3 years of experience\")."
            .to_string()
    })
}

fn missing_education(analysis: &ResumeAnalysis, _score: u32) -> Option<String> {
    analysis
        .education
        .is_empty()
        .then(|| "Add a clear 'Education' section.".to_string())
}

fn missing_email(analysis: &ResumeAnalysis, _score: u32) -> Option<String> {
    is_blank(analysis.contact.email.as_deref())
        .then(|| "Add your email address to the resume.".to_string())
}

fn missing_phone(analysis: &ResumeAnalysis, _score: u32) -> Option<String> {
    is_blank(analysis.contact.phone.as_deref())
        .then(|| "Add a phone number to your contact details.".to_string())
}

fn low_confidence_skills(analysis: &ResumeAnalysis, _score: u32) -> Option<String> {
    let weak: Vec<&str> = analysis
        .skills
        .iter()
        .filter(|s| s.confidence < LOW_CONFIDENCE)
        .map(|s| s.name.trim())
        .filter(|n| !n.is_empty())
        .take(3)
        .collect();

    (!weak.is_empty()).then(|| {
        format!(
            "Back up {} with concrete experience: mention where and how you used them.",
            weak.join(", ")
        )
    })
}

fn weak_score(_analysis: &ResumeAnalysis, score: u32) -> Option<String> {
    (score < WEAK_SCORE).then(|| {
        "Use more action verbs and include quantifiable results and metrics.".to_string()
    })
}

fn is_blank(value: Option<&str>) -> bool {
    value.map(|v| v.trim().is_empty()).unwrap_or(true)
}
