// Skill matching core: normalization, per-posting scoring, pool ranking.
// Pure and synchronous. Posting fetches happen in `sources` before anything
// here runs.

pub mod handlers;
pub mod normalizer;
pub mod ranking;
pub mod scorer;

use std::collections::HashSet;
use std::num::NonZeroUsize;

use thiserror::Error;

/// Result size used when the caller does not ask for one.
pub const DEFAULT_MATCH_LIMIT: usize = 10;

/// Rejections raised at the input boundary, before any scoring happens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("skill at position {index} is empty")]
    EmptySkill { index: usize },

    #[error("limit must be a positive integer, got {0}")]
    NonPositiveLimit(i64),

    #[error("limit must be an integer, got '{0}'")]
    InvalidLimit(String),
}

/// Skills deduplicated by exact string value, first occurrence wins.
///
/// Deduplication ignores the substring equivalence used for
/// matching: "React" and "React.js" are two entries here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillSet(Vec<String>);

impl SkillSet {
    /// Builds a candidate skill set from untrusted input. Entries are trimmed;
    /// an entry that is empty after trimming rejects the whole request.
    pub fn parse<I, S>(skills: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trimmed = Vec::new();
        for (index, skill) in skills.into_iter().enumerate() {
            let skill = skill.as_ref().trim();
            if skill.is_empty() {
                return Err(InputError::EmptySkill { index });
            }
            trimmed.push(skill.to_string());
        }
        Ok(Self::dedup(trimmed))
    }

    /// Builds the required-skill set of a posting. Postings come from sources
    /// we don't control, so blank labels are skipped instead of rejected: an
    /// empty label would otherwise be a substring of every candidate skill.
    pub fn from_required(skills: &[String]) -> Self {
        Self::dedup(
            skills
                .iter()
                .filter(|s| !s.trim().is_empty())
                .cloned()
                .collect(),
        )
    }

    fn dedup(skills: Vec<String>) -> Self {
        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(skills.len());
        for skill in skills {
            if seen.insert(skill.clone()) {
                unique.push(skill);
            }
        }
        Self(unique)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Positive result-size limit for a ranking pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchLimit(NonZeroUsize);

impl MatchLimit {
    pub fn new(limit: i64) -> Result<Self, InputError> {
        usize::try_from(limit)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self)
            .ok_or(InputError::NonPositiveLimit(limit))
    }

    /// Parses the raw `limit` query value if present, otherwise uses `default`.
    pub fn resolve(requested: Option<&str>, default: MatchLimit) -> Result<Self, InputError> {
        let Some(raw) = requested else {
            return Ok(default);
        };
        let limit = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| InputError::InvalidLimit(raw.to_string()))?;
        Self::new(limit)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for MatchLimit {
    fn default() -> Self {
        match NonZeroUsize::new(DEFAULT_MATCH_LIMIT) {
            Some(n) => Self(n),
            None => unreachable!("DEFAULT_MATCH_LIMIT is non-zero"),
        }
    }
}
