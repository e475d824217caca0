use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::matching::MatchPolicy;

const DEFAULT_MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;
const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60;

/// Application configuration loaded from environment variables.
/// Startup fails if a value is present but invalid.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub match_policy: MatchPolicy,
    pub skill_taxonomy_path: Option<PathBuf>,
    pub anthropic_api_key: Option<String>,
    pub enable_llm_scoring: bool,
    pub enable_llm_extraction: bool,
    pub jsearch_api_key: Option<String>,
    pub jsearch_country: String,
    pub jsearch_default_location: String,
    pub max_resume_bytes: usize,
    /// Resumes older than this are swept with their cached matches. 0 disables the sweep.
    pub session_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = Config {
            port: get("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            match_policy: match get("MATCH_POLICY") {
                Some(v) => v
                    .parse::<MatchPolicy>()
                    .context("MATCH_POLICY must be 'taxonomy' or 'weighted'")?,
                None => MatchPolicy::default(),
            },
            skill_taxonomy_path: get("SKILL_TAXONOMY_PATH").map(PathBuf::from),
            anthropic_api_key: get("ANTHROPIC_API_KEY"),
            enable_llm_scoring: parse_flag(get("ENABLE_LLM_SCORING"), "ENABLE_LLM_SCORING")?,
            enable_llm_extraction: parse_flag(
                get("ENABLE_LLM_EXTRACTION"),
                "ENABLE_LLM_EXTRACTION",
            )?,
            jsearch_api_key: get("JSEARCH_API_KEY"),
            jsearch_country: get("JSEARCH_COUNTRY").unwrap_or_else(|| "IN".to_string()),
            jsearch_default_location: get("JSEARCH_DEFAULT_LOCATION")
                .unwrap_or_else(|| "India".to_string()),
            max_resume_bytes: match get("MAX_RESUME_BYTES") {
                Some(v) => v
                    .parse::<usize>()
                    .context("MAX_RESUME_BYTES must be a positive integer")?,
                None => DEFAULT_MAX_RESUME_BYTES,
            },
            session_ttl_secs: match get("SESSION_TTL_SECS") {
                Some(v) => v
                    .parse::<u64>()
                    .context("SESSION_TTL_SECS must be a non-negative integer")?,
                None => DEFAULT_SESSION_TTL_SECS,
            },
        };

        if (config.enable_llm_scoring || config.enable_llm_extraction)
            && config.anthropic_api_key.is_none()
        {
            bail!("ANTHROPIC_API_KEY is required when LLM scoring or extraction is enabled");
        }

        Ok(config)
    }
}

fn parse_flag(value: Option<String>, key: &str) -> Result<bool> {
    match value.as_deref().map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(false),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => bail!("{key} must be a boolean (true/false)"),
        },
    }
}
