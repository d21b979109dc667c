//! Ranking: scores a posting pool against one candidate skill set.
//!
//! Algorithm:
//! 1. Empty candidate set → empty ranking (callers fall back to an unranked listing)
//! 2. Score every posting in `GeneralPool` mode
//! 3. Drop score-0 postings (not a match, rather than a bad one)
//! 4. Stable sort by score descending; ties keep pool order (usually recency)
//! 5. Truncate to the limit

use serde::Serialize;

use crate::matching::scorer::score_general;
use crate::matching::{MatchLimit, SkillSet};
use crate::models::posting::Posting;

/// A scored posting. Borrows the posting from the pool it was ranked from.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult<'a> {
    #[serde(flatten)]
    pub posting: &'a Posting,
    pub match_score: u32,
    pub matching_skills: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Ranking<'a> {
    pub matches: Vec<MatchResult<'a>>,
    /// Postings with a non-zero score, before truncation.
    pub total_found: usize,
}

pub fn rank<'a>(candidate: &SkillSet, postings: &'a [Posting], limit: MatchLimit) -> Ranking<'a> {
    if candidate.is_empty() {
        return Ranking::default();
    }

    let mut matches: Vec<MatchResult<'a>> = postings
        .iter()
        .filter_map(|posting| {
            let required = SkillSet::from_required(&posting.required_skills);
            let scored = score_general(candidate, &required);
            (scored.score > 0).then(|| MatchResult {
                posting,
                match_score: scored.score,
                matching_skills: scored.matching_skills,
            })
        })
        .collect();

    // `sort_by` is stable.
    matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));

    let total_found = matches.len();
    matches.truncate(limit.get());

    Ranking {
        matches,
        total_found,
    }
}
