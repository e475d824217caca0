use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Shown in `strengths` when nothing matched. Part of the public contract.
pub const NO_STRENGTHS_FALLBACK: &str = "No strong matches found";
/// Shown in `missingSkills` when nothing is missing. Part of the public contract.
pub const NO_GAPS_FALLBACK: &str = "No major gaps";

/// Outcome of one scoring call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub match_score: u32, // 0 – 100
    pub strengths: String,
    pub missing_skills: String,
}

/// Insertion-ordered set of terms.
#[derive(Debug, Clone, Default)]
pub struct TermSet {
    seen: HashSet<String>,
    terms: Vec<String>,
}

impl TermSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the term was already present.
    pub fn insert(&mut self, term: &str) -> bool {
        if self.seen.contains(term) {
            return false;
        }
        self.seen.insert(term.to_string());
        self.terms.push(term.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.terms
    }

    /// The first `limit` terms.
    pub fn truncated(&self, limit: usize) -> &[String] {
        &self.terms[..self.terms.len().min(limit)]
    }
}

impl<'a> FromIterator<&'a str> for TermSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = TermSet::new();
        for term in iter {
            set.insert(term);
        }
        set
    }
}

/// Joins `found` and `missing` with `", "`, substituting the fallback strings
/// for empty lists.
pub fn format_result(found: &[String], missing: &[String], score: u32) -> MatchResult {
    MatchResult {
        match_score: score.min(100),
        strengths: join_or(found, NO_STRENGTHS_FALLBACK),
        missing_skills: join_or(missing, NO_GAPS_FALLBACK),
    }
}

fn join_or(terms: &[String], fallback: &str) -> String {
    if terms.is_empty() {
        fallback.to_string()
    } else {
        terms.join(", ")
    }
}
