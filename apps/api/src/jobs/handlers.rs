//! Axum route handlers for the Jobs API.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::jobs::JobSearchQuery;
use crate::models::job::Job;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct JobSearchResponse {
    pub message: String,
    pub jobs: Vec<Job>,
}

/// POST /api/v1/jobs/search
///
/// Replaces the stored job list with fresh results. Cached scores refer to the
/// old list and are dropped.
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    Json(query): Json<JobSearchQuery>,
) -> Result<Json<JobSearchResponse>, AppError> {
    if query.query.trim().is_empty() {
        return Err(AppError::Validation("Please enter a job title.".to_string()));
    }

    let jobs = state.job_source.search(&query).await?;

    state.jobs.replace_all(jobs.clone()).await;
    state.matches.clear().await;
    info!("Stored {} jobs", jobs.len());

    Ok(Json(JobSearchResponse {
        message: format!("Found {} jobs.", jobs.len()),
        jobs,
    }))
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Json<Vec<Job>> {
    Json(state.jobs.list().await)
}
