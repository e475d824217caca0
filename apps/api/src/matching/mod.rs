// Resume ↔ job matching.
// The engine is pure and synchronous: text in, MatchResult out. Sessions, stores
// and LLM calls live in `service` and `scorer`, never in the engine itself.

pub mod engine;
pub mod format;
pub mod handlers;
pub mod keywords;
pub mod normalize;
pub mod prompts;
pub mod scorer;
pub mod service;
pub mod taxonomy;
pub mod weights;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use engine::MatchEngine;
pub use format::{MatchResult, NO_GAPS_FALLBACK, NO_STRENGTHS_FALLBACK};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("skill taxonomy unavailable: {0}")]
    ConfigurationMissing(String),
}

/// Which scoring strategy runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// Fixed skill phrases from the taxonomy, unweighted substring matching.
    Taxonomy,
    /// Keywords extracted from the job description, weighted.
    #[default]
    Weighted,
}

impl MatchPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchPolicy::Taxonomy => "taxonomy",
            MatchPolicy::Weighted => "weighted",
        }
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchPolicy {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "taxonomy" => Ok(MatchPolicy::Taxonomy),
            "weighted" => Ok(MatchPolicy::Weighted),
            other => Err(MatchError::InvalidInput(format!(
                "unknown match policy '{other}' (expected 'taxonomy' or 'weighted')"
            ))),
        }
    }
}

/// Scoring inputs as they arrive from a caller. Either text may be absent;
/// [`MatchRequest::validate`] turns absence into [`MatchError::InvalidInput`].
/// `policy` stays a string until [`MatchRequest::policy`] parses it, so an
/// unknown name is reported as invalid input too.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    pub resume_text: Option<String>,
    pub job_description: Option<String>,
    pub policy: Option<String>,
}

impl MatchRequest {
    /// Empty strings are valid; only absent fields are rejected.
    pub fn validate(&self) -> Result<(&str, &str), MatchError> {
        let resume = self
            .resume_text
            .as_deref()
            .ok_or_else(|| MatchError::InvalidInput("resume text is missing".to_string()))?;
        let job = self
            .job_description
            .as_deref()
            .ok_or_else(|| MatchError::InvalidInput("job description is missing".to_string()))?;
        Ok((resume, job))
    }

    /// The requested policy, or `None` when the caller left it to the server.
    pub fn policy(&self) -> Result<Option<MatchPolicy>, MatchError> {
        self.policy.as_deref().map(str::parse::<MatchPolicy>).transpose()
    }
}
