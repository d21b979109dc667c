use serde::{Deserialize, Serialize};

/// Lifecycle of a resume analysis.
///
/// `Failed` is only ever set by the analysis collaborator; scoring always
/// moves an analysis to `Completed`, degraded or not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    #[default]
    Processing,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Junior,
    Mid,
    Senior,
}

impl ExperienceLevel {
    /// junior < 2 years, mid 2–4, senior 5+
    pub fn from_years(years: u32) -> Self {
        match years {
            y if y >= 5 => ExperienceLevel::Senior,
            y if y >= 2 => ExperienceLevel::Mid,
            _ => ExperienceLevel::Junior,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSkill {
    pub name: String,
    #[serde(default)]
    pub confidence: f64, // 0.0 – 1.0
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(default)]
    pub years: u32,
    #[serde(default)]
    pub level: Option<ExperienceLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Structured output of resume analysis plus the ATS fields filled in by
/// scoring. Every field may be empty; scoring must still produce a result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    #[serde(default)]
    pub status: AnalysisStatus,
    #[serde(default)]
    pub skills: Vec<ExtractedSkill>,
    #[serde(default)]
    pub experience: Option<Experience>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub contact: Contact,
    /// Collaborator-provided score, replaced by the final score once scored.
    #[serde(default)]
    pub ats_score: Option<f64>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl ResumeAnalysis {
    /// Placeholder for an analysis whose collaborator call failed outright.
    pub fn failed() -> Self {
        Self {
            status: AnalysisStatus::Failed,
            ..Default::default()
        }
    }

    pub fn years_of_experience(&self) -> u32 {
        self.experience.as_ref().map(|e| e.years).unwrap_or(0)
    }

    pub fn skill_names(&self) -> Vec<String> {
        self.skills
            .iter()
            .map(|s| s.name.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_level_boundaries() {
        assert_eq!(ExperienceLevel::from_years(0), ExperienceLevel::Junior);
        assert_eq!(ExperienceLevel::from_years(1), ExperienceLevel::Junior);
        assert_eq!(ExperienceLevel::from_years(2), ExperienceLevel::Mid);
        assert_eq!(ExperienceLevel::from_years(4), ExperienceLevel::Mid);
        assert_eq!(ExperienceLevel::from_years(5), ExperienceLevel::Senior);
    }

    #[test]
    fn test_empty_json_deserializes_to_processing() {
        let analysis: ResumeAnalysis = serde_json::from_str("{}").unwrap();
        assert_eq!(analysis.status, AnalysisStatus::Processing);
        assert!(analysis.skills.is_empty());
        assert_eq!(analysis.years_of_experience(), 0);
    }

    #[test]
    fn test_skill_names_skip_blank_entries() {
        let analysis = ResumeAnalysis {
            skills: vec![
                ExtractedSkill {
                    name: " Rust ".to_string(),
                    confidence: 0.9,
                    category: None,
                },
                ExtractedSkill {
                    name: "".to_string(),
                    confidence: 0.4,
                    category: None,
                },
            ],
            ..Default::default()
        };
        assert_eq!(analysis.skill_names(), vec!["Rust"]);
    }

    #[test]
    fn test_status_serde_snake_case() {
        let json = serde_json::to_string(&AnalysisStatus::Completed).unwrap();
        assert_eq!(json, r#""completed""#);
    }
}
