// Job search: a pluggable job source plus the handlers that store its results.

pub mod handlers;
pub mod jsearch;

use async_trait::async_trait;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::job::Job;

#[derive(Debug, Clone, Deserialize)]
pub struct JobSearchQuery {
    pub query: String,
    pub location: Option<String>,
}

/// Where job postings come from. Carried in `AppState` as `Arc<dyn JobSource>`.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn search(&self, query: &JobSearchQuery) -> Result<Vec<Job>, AppError>;
}
