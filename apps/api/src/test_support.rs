//! Shared fixtures for unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::config::Config;
use crate::errors::AppError;
use crate::jobs::{JobSearchQuery, JobSource};
use crate::models::job::Job;
use crate::state::AppState;

/// State built from an empty environment: weighted policy, built-in taxonomy,
/// local extraction, no job provider key.
pub fn test_state() -> AppState {
    let config = Config::from_lookup(|_| None).expect("empty environment is a valid config");
    AppState::from_config(config).expect("default state builds")
}

pub fn sample_job(id: &str, description: &str) -> Job {
    Job {
        id: id.to_string(),
        title: "Software Engineer".to_string(),
        description: description.to_string(),
        company: "Acme".to_string(),
        location: "Remote".to_string(),
        apply_url: id.to_string(),
        created_at: Utc::now(),
    }
}

/// Job source that returns a fixed list for any query.
#[derive(Default)]
pub struct StubJobSource {
    jobs: Vec<Job>,
}

impl StubJobSource {
    pub fn with_jobs(jobs: &[(&str, &str)]) -> Self {
        Self {
            jobs: jobs
                .iter()
                .map(|(id, description)| sample_job(id, description))
                .collect(),
        }
    }
}

#[async_trait]
impl JobSource for StubJobSource {
    async fn search(&self, _query: &JobSearchQuery) -> Result<Vec<Job>, AppError> {
        Ok(self.jobs.clone())
    }
}

pub fn state_with_jobs(source: StubJobSource) -> AppState {
    AppState {
        job_source: Arc::new(source),
        ..test_state()
    }
}
