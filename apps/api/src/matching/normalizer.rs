//! Skill label normalization and equivalence.

/// Canonical comparison form of a skill label: trimmed and lowercased.
/// No stemming, no synonym table.
pub fn normalize(skill: &str) -> String {
    skill.trim().to_lowercase()
}

/// Two skills are equivalent when either normalized label contains the other
/// ("react" vs "react.js").
///
/// NOTE: this relation is symmetric but not transitive: "java" ~ "javascript"
/// and "javascript" ~ "script", yet "java" !~ "script". Match counts downstream
/// depend on this exact rule, so it must not be tightened into equality or
/// stemming without re-baselining scores.
pub fn matches(a: &str, b: &str) -> bool {
    overlaps(&normalize(a), &normalize(b))
}

fn overlaps(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}
