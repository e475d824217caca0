use std::collections::HashSet;

use serde::Serialize;

pub const DEFAULT_WEIGHT: u32 = 2;
pub const SOFT_SKILL_WEIGHT: u32 = 1;
pub const HIGH_VALUE_WEIGHT: u32 = 3;

pub const SOFT_SKILL_TERMS: &[&str] = &[
    "communication",
    "teamwork",
    "leadership",
    "problem",
    "management",
    "collaboration",
];

/// "skills" is also posting filler in the default stopword set, so its weight
/// only counts when extraction uses `StopwordSet::minimal()`.
pub const HIGH_VALUE_TERMS: &[&str] = &[
    "experience",
    "skills",
    "knowledge",
    "design",
    "development",
];

/// A keyword and the weight it contributes to the weighted score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeightedTerm {
    pub term: String,
    pub weight: u32,
}

/// Assigns importance weights to keywords by category membership.
/// High-value membership wins over soft-skill membership.
#[derive(Debug, Clone)]
pub struct WeightingPolicy {
    soft_terms: HashSet<&'static str>,
    high_value_terms: HashSet<&'static str>,
}

impl Default for WeightingPolicy {
    fn default() -> Self {
        Self {
            soft_terms: SOFT_SKILL_TERMS.iter().copied().collect(),
            high_value_terms: HIGH_VALUE_TERMS.iter().copied().collect(),
        }
    }
}

impl WeightingPolicy {
    pub fn weight_for(&self, term: &str) -> u32 {
        if self.high_value_terms.contains(term) {
            HIGH_VALUE_WEIGHT
        } else if self.soft_terms.contains(term) {
            SOFT_SKILL_WEIGHT
        } else {
            DEFAULT_WEIGHT
        }
    }

    pub fn weigh(&self, term: &str) -> WeightedTerm {
        WeightedTerm {
            term: term.to_string(),
            weight: self.weight_for(term),
        }
    }
}
