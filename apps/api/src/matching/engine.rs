//! The matching engine: one entry point, two deterministic policies.
//!
//! `Taxonomy` asks "which known skills does this job need, and does the resume
//! have them". `Weighted` asks "which words of this particular job description
//! does the resume echo". Neither dominates, so both stay selectable.
//!
//! Containment is substring-based in both policies: `sql` matches inside
//! `mysql`. Taxonomy phrases are matched against the whole normalized text,
//! weighted keywords come from whole-token extraction of the job description.

use std::sync::Arc;

use tracing::debug;

use crate::matching::format::{format_result, MatchResult, TermSet};
use crate::matching::keywords::KeywordExtractor;
use crate::matching::normalize::normalize;
use crate::matching::taxonomy::SkillTaxonomy;
use crate::matching::weights::{WeightedTerm, WeightingPolicy};
use crate::matching::{MatchError, MatchPolicy};

/// Maximum number of distinct terms listed by the weighted policy.
pub const WEIGHTED_DISPLAY_CAP: usize = 10;

/// Stateless after construction; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    taxonomy: Option<Arc<SkillTaxonomy>>,
    extractor: KeywordExtractor,
    weighting: WeightingPolicy,
}

impl Default for MatchEngine {
    /// Built-in taxonomy, default stopwords and weights.
    fn default() -> Self {
        Self::new(
            Some(Arc::new(SkillTaxonomy::builtin().clone())),
            KeywordExtractor::default(),
            WeightingPolicy::default(),
        )
    }
}

impl MatchEngine {
    /// `taxonomy` is `None` when it failed to load; the taxonomy policy then
    /// returns [`MatchError::ConfigurationMissing`].
    pub fn new(
        taxonomy: Option<Arc<SkillTaxonomy>>,
        extractor: KeywordExtractor,
        weighting: WeightingPolicy,
    ) -> Self {
        Self {
            taxonomy,
            extractor,
            weighting,
        }
    }

    pub fn taxonomy(&self) -> Option<&SkillTaxonomy> {
        self.taxonomy.as_deref()
    }

    pub fn compute_match(
        &self,
        resume_text: &str,
        job_description: &str,
        policy: MatchPolicy,
    ) -> Result<MatchResult, MatchError> {
        let result = match policy {
            MatchPolicy::Taxonomy => self.score_taxonomy(resume_text, job_description)?,
            MatchPolicy::Weighted => self.score_weighted(resume_text, job_description),
        };

        debug!(
            policy = %policy,
            score = result.match_score,
            "Computed match"
        );
        Ok(result)
    }

    fn score_taxonomy(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<MatchResult, MatchError> {
        let taxonomy = self
            .taxonomy
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                MatchError::ConfigurationMissing("no skill taxonomy is loaded".to_string())
            })?;

        let resume = normalize(resume_text);
        let job = normalize(job_description);

        let mut found = TermSet::new();
        let mut missing = TermSet::new();

        for phrase in taxonomy.phrases().filter(|p| job.contains(p)) {
            if resume.contains(phrase) {
                found.insert(phrase);
            } else {
                missing.insert(phrase);
            }
        }

        let relevant = (found.len() + missing.len()) as u64;
        let score = percent_half_up(found.len() as u64, relevant);

        Ok(format_result(found.as_slice(), missing.as_slice(), score))
    }

    fn score_weighted(&self, resume_text: &str, job_description: &str) -> MatchResult {
        let resume = resume_text.to_lowercase();
        let keywords = self.extractor.extract(job_description);

        let mut matched_weight = 0_u64;
        let mut total_weight = 0_u64;
        let mut matched = TermSet::new();
        let mut missing = TermSet::new();

        // Every occurrence counts toward the totals; only the display lists dedupe.
        for keyword in &keywords {
            let WeightedTerm { term, weight } = self.weighting.weigh(keyword);
            let weight = u64::from(weight);
            total_weight += weight;

            if resume.contains(term.as_str()) {
                matched_weight += weight;
                matched.insert(&term);
            } else {
                missing.insert(&term);
            }
        }

        let score = percent_half_up(matched_weight, total_weight).min(100);

        format_result(
            matched.truncated(WEIGHTED_DISPLAY_CAP),
            missing.truncated(WEIGHTED_DISPLAY_CAP),
            score,
        )
    }
}

/// `round(100 * part / whole)` with halves rounded up; 0 when `whole == 0`.
fn percent_half_up(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((200 * part + whole) / (2 * whole)) as u32
}
