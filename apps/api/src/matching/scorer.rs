//! Scorer backends: what the orchestration layer calls to score a resume.
//!
//! Default: `KeywordScorer` (the deterministic engine with a configured policy).
//! Optional: `LlmScorer` (semantic scoring via Claude, ENABLE_LLM_SCORING).
//!
//! `AppState` holds an `Arc<dyn ResumeScorer>`, chosen at startup via config.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::matching::format::MatchResult;
use crate::matching::prompts::{score_resume_prompt, SCORE_RESUME_SYSTEM};
use crate::matching::{MatchEngine, MatchPolicy};

#[async_trait]
pub trait ResumeScorer: Send + Sync {
    async fn score(&self, resume_text: &str, job_description: &str)
        -> Result<MatchResult, AppError>;

    /// "taxonomy" | "weighted" | "llm"
    fn backend(&self) -> &'static str;
}

pub struct KeywordScorer {
    engine: Arc<MatchEngine>,
    policy: MatchPolicy,
}

impl KeywordScorer {
    pub fn new(engine: Arc<MatchEngine>, policy: MatchPolicy) -> Self {
        Self { engine, policy }
    }
}

#[async_trait]
impl ResumeScorer for KeywordScorer {
    async fn score(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<MatchResult, AppError> {
        Ok(self
            .engine
            .compute_match(resume_text, job_description, self.policy)?)
    }

    fn backend(&self) -> &'static str {
        self.policy.as_str()
    }
}

pub struct LlmScorer(pub LlmClient);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LlmMatch {
    match_score: f64,
    #[serde(default)]
    missing_skills: String,
    #[serde(default)]
    strengths: String,
}

impl From<LlmMatch> for MatchResult {
    /// The model is asked for 0–100 but not trusted to stay inside it.
    fn from(raw: LlmMatch) -> Self {
        let score = if raw.match_score.is_finite() {
            raw.match_score.round().clamp(0.0, 100.0) as u32
        } else {
            0
        };
        crate::matching::format::format_result(
            &split_terms(&raw.strengths),
            &split_terms(&raw.missing_skills),
            score,
        )
    }
}

fn split_terms(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl ResumeScorer for LlmScorer {
    async fn score(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<MatchResult, AppError> {
        let prompt = score_resume_prompt(resume_text, job_description);

        let raw: LlmMatch = self
            .0
            .call_json(&prompt, SCORE_RESUME_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Resume scoring failed: {e}")))?;

        Ok(raw.into())
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{MatchError, NO_GAPS_FALLBACK, NO_STRENGTHS_FALLBACK};

    #[tokio::test]
    async fn test_keyword_scorer_uses_configured_policy() {
        let engine = Arc::new(MatchEngine::default());
        let scorer = KeywordScorer::new(engine, MatchPolicy::Taxonomy);
        let result = scorer
            .score(
                "I know React and SQL well.",
                "Looking for React and Node experience with SQL",
            )
            .await
            .unwrap();
        assert_eq!(result.match_score, 67);
        assert_eq!(scorer.backend(), "taxonomy");
    }

    #[tokio::test]
    async fn test_keyword_scorer_surfaces_configuration_missing() {
        let engine = Arc::new(MatchEngine::new(
            None,
            Default::default(),
            Default::default(),
        ));
        let scorer = KeywordScorer::new(engine, MatchPolicy::Taxonomy);
        let err = scorer.score("react", "react").await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Match(MatchError::ConfigurationMissing(_))
        ));
    }

    #[test]
    fn test_llm_match_clamps_score() {
        let raw: LlmMatch =
            serde_json::from_str(r#"{"matchScore": 140.2, "strengths": "rust", "missingSkills": ""}"#)
                .unwrap();
        let result = MatchResult::from(raw);
        assert_eq!(result.match_score, 100);
        assert_eq!(result.strengths, "rust");
        assert_eq!(result.missing_skills, NO_GAPS_FALLBACK);
    }

    #[test]
    fn test_llm_match_normalizes_lists() {
        let raw: LlmMatch = serde_json::from_str(
            r#"{"matchScore": 72.5, "strengths": " ,", "missingSkills": "kafka ,  terraform,"}"#,
        )
        .unwrap();
        let result = MatchResult::from(raw);
        assert_eq!(result.match_score, 73);
        assert_eq!(result.strengths, NO_STRENGTHS_FALLBACK);
        assert_eq!(result.missing_skills, "kafka, terraform");
    }

    #[test]
    fn test_llm_match_negative_score_is_zero() {
        let raw: LlmMatch = serde_json::from_str(r#"{"matchScore": -3}"#).unwrap();
        assert_eq!(MatchResult::from(raw).match_score, 0);
    }
}
