//! Match scoring for a single posting.
//!
//! The same matching loop backs two call sites that normalize differently:
//! - `GeneralPool`: skills search over many postings, denominator is
//!   `max(|candidate|, |required|)`
//! - `SpecificPosting`: one resume against one known posting, denominator is
//!   `|required|`
//!
//! They are not interchangeable. The pool mode penalizes candidates whose
//! skill list is much longer than a posting's requirements, which changes
//! ranking order.

use serde::{Deserialize, Serialize};

use crate::matching::normalizer::matches;
use crate::matching::SkillSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenominatorMode {
    GeneralPool,
    SpecificPosting,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchScore {
    pub score: u32, // 0 – 100
    /// Required skills the candidate satisfies, in the posting's declared order.
    pub matching_skills: Vec<String>,
}

pub fn score(candidate: &SkillSet, required: &SkillSet, mode: DenominatorMode) -> MatchScore {
    let matching_skills: Vec<String> = required
        .iter()
        .filter(|r| candidate.iter().any(|c| matches(c, r)))
        .map(str::to_string)
        .collect();

    let denominator = match mode {
        DenominatorMode::GeneralPool => candidate.len().max(required.len()),
        DenominatorMode::SpecificPosting => required.len(),
    };

    MatchScore {
        score: percentage(matching_skills.len(), denominator),
        matching_skills,
    }
}

/// Shorthand for the skills-search variant.
pub fn score_general(candidate: &SkillSet, required: &SkillSet) -> MatchScore {
    score(candidate, required, DenominatorMode::GeneralPool)
}

/// Shorthand for the resume → one posting variant.
pub fn score_specific(candidate: &SkillSet, required: &SkillSet) -> MatchScore {
    score(candidate, required, DenominatorMode::SpecificPosting)
}

fn percentage(matched: usize, denominator: usize) -> u32 {
    // A posting with no requirements is not a match for anyone.
    if denominator == 0 {
        return 0;
    }
    let raw = (100.0 * matched as f64 / denominator as f64).round();
    raw.clamp(0.0, 100.0) as u32
}
