use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::extraction::{LlmTextExtractor, LocalTextExtractor, TextExtractor};
use crate::jobs::jsearch::JSearchClient;
use crate::jobs::JobSource;
use crate::llm_client::LlmClient;
use crate::matching::keywords::KeywordExtractor;
use crate::matching::scorer::{KeywordScorer, LlmScorer, ResumeScorer};
use crate::matching::taxonomy::SkillTaxonomy;
use crate::matching::weights::WeightingPolicy;
use crate::matching::{MatchEngine, MatchPolicy};
use crate::store::{InMemoryStore, JobStore, MatchCache, ResumeStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// The deterministic engine, also used directly by POST /api/v1/match.
    pub engine: Arc<MatchEngine>,
    /// Pluggable scorer for session scoring. Default: KeywordScorer.
    pub scorer: Arc<dyn ResumeScorer>,
    pub extractor: Arc<dyn TextExtractor>,
    pub job_source: Arc<dyn JobSource>,
    pub jobs: Arc<dyn JobStore>,
    pub resumes: Arc<dyn ResumeStore>,
    pub matches: Arc<dyn MatchCache>,
}

impl AppState {
    /// Wires every collaborator from config. In-memory stores only.
    pub fn from_config(config: Config) -> Result<Self> {
        let engine = Arc::new(build_engine(&config)?);

        let llm = config
            .anthropic_api_key
            .clone()
            .map(LlmClient::new)
            .transpose()
            .context("Failed to build LLM HTTP client")?;

        let scorer: Arc<dyn ResumeScorer> = match (&llm, config.enable_llm_scoring) {
            (Some(llm), true) => {
                info!("Resume scorer: llm (model: {})", crate::llm_client::MODEL);
                Arc::new(LlmScorer(llm.clone()))
            }
            _ => {
                info!("Resume scorer: {}", config.match_policy);
                Arc::new(KeywordScorer::new(engine.clone(), config.match_policy))
            }
        };

        let extractor: Arc<dyn TextExtractor> = match (&llm, config.enable_llm_extraction) {
            (Some(llm), true) => Arc::new(LlmTextExtractor(llm.clone())),
            _ => Arc::new(LocalTextExtractor),
        };

        if config.jsearch_api_key.is_none() {
            warn!("JSEARCH_API_KEY is not set; job search will fail until it is configured");
        }
        let job_source = Arc::new(
            JSearchClient::new(
                config.jsearch_api_key.clone(),
                config.jsearch_country.clone(),
                config.jsearch_default_location.clone(),
            )
            .context("Failed to build job search client")?,
        );

        let store = Arc::new(InMemoryStore::new());

        Ok(Self {
            config,
            engine,
            scorer,
            extractor,
            job_source,
            jobs: store.clone(),
            resumes: store.clone(),
            matches: store,
        })
    }
}

/// A taxonomy file that fails to load is fatal only when the taxonomy policy
/// is the default; otherwise taxonomy requests report ConfigurationMissing.
fn build_engine(config: &Config) -> Result<MatchEngine> {
    let taxonomy = match &config.skill_taxonomy_path {
        None => Some(Arc::new(SkillTaxonomy::builtin().clone())),
        Some(path) => match SkillTaxonomy::from_path(path) {
            Ok(taxonomy) => Some(Arc::new(taxonomy)),
            Err(e) if config.match_policy == MatchPolicy::Taxonomy => {
                return Err(anyhow::Error::new(e)
                    .context("MATCH_POLICY=taxonomy requires a loadable skill taxonomy"));
            }
            Err(e) => {
                error!("{e}; taxonomy policy disabled");
                None
            }
        },
    };

    Ok(MatchEngine::new(
        taxonomy,
        KeywordExtractor::default(),
        WeightingPolicy::default(),
    ))
}
