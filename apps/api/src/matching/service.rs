//! Session scoring: looks up the session's resume and a stored job, scores them
//! with the configured backend, and caches the result per (session, job).

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::{MatchError, MatchResult};
use crate::models::job::Job;
use crate::models::matches::JobMatch;
use crate::state::AppState;
use crate::store::CacheGeneration;

/// One row of a batch scoring response. Exactly one of `match`/`error` is set.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntry {
    pub job_id: String,
    #[serde(rename = "match")]
    pub job_match: Option<JobMatch>,
    pub error: Option<String>,
}

async fn resume_text(state: &AppState, session_id: Uuid) -> Result<String, AppError> {
    state
        .resumes
        .get(session_id)
        .await
        .map(|record| record.text)
        .ok_or_else(|| {
            MatchError::InvalidInput("resume not uploaded for this session".to_string()).into()
        })
}

/// Scores the session's resume against one stored job, serving from cache when possible.
///
/// The cache generation is read before the resume and the job. A re-upload or
/// new job search that lands while the scorer runs makes the result stale, and
/// it is returned but not cached.
pub async fn score_job(
    state: &AppState,
    session_id: Uuid,
    job_id: &str,
) -> Result<JobMatch, AppError> {
    let generation = state.matches.generation(session_id).await;
    if let Some(cached) = state.matches.get(session_id, job_id).await {
        debug!("Match cache hit for session {session_id}, job {job_id}");
        return Ok(cached);
    }

    let resume = resume_text(state, session_id).await?;
    let job = state
        .jobs
        .get(job_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let result = state.scorer.score(&resume, &job.description).await?;
    let job_match = record_match(state, session_id, &job.id, result, generation).await;
    Ok(job_match)
}

/// Scores every stored job concurrently, one task per job. Results come back in
/// stored-job order regardless of which task finished first.
pub async fn score_all_jobs(
    state: &AppState,
    session_id: Uuid,
) -> Result<Vec<BatchEntry>, AppError> {
    let generation = state.matches.generation(session_id).await;
    let resume: Arc<str> = resume_text(state, session_id).await?.into();
    let jobs = state.jobs.list().await;

    let mut outcomes: HashMap<String, Result<JobMatch, String>> = HashMap::new();
    let mut pending: Vec<Job> = Vec::new();

    for job in &jobs {
        match state.matches.get(session_id, &job.id).await {
            Some(cached) => {
                outcomes.insert(job.id.clone(), Ok(cached));
            }
            None => pending.push(job.clone()),
        }
    }

    let mut tasks = JoinSet::new();
    for job in pending {
        let scorer = state.scorer.clone();
        let resume = resume.clone();
        tasks.spawn(async move {
            let result = scorer.score(&resume, &job.description).await;
            (job.id, result)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        let (job_id, result) = joined.map_err(|e| AppError::Internal(e.into()))?;
        let outcome = match result {
            Ok(result) => Ok(record_match(state, session_id, &job_id, result, generation).await),
            Err(e) => {
                warn!("Scoring job {job_id} failed: {e}");
                Err(e.to_string())
            }
        };
        outcomes.insert(job_id, outcome);
    }

    Ok(jobs
        .into_iter()
        .map(|job| {
            let outcome = outcomes
                .remove(&job.id)
                .unwrap_or_else(|| Err("job was not scored".to_string()));
            match outcome {
                Ok(job_match) => BatchEntry {
                    job_id: job.id,
                    job_match: Some(job_match),
                    error: None,
                },
                Err(error) => BatchEntry {
                    job_id: job.id,
                    job_match: None,
                    error: Some(error),
                },
            }
        })
        .collect())
}

async fn record_match(
    state: &AppState,
    session_id: Uuid,
    job_id: &str,
    result: MatchResult,
    generation: CacheGeneration,
) -> JobMatch {
    let job_match = JobMatch {
        session_id,
        job_id: job_id.to_string(),
        result,
        scorer_backend: state.scorer.backend().to_string(),
        created_at: Utc::now(),
    };
    if !state.matches.put(job_match.clone(), generation).await {
        debug!("Discarded stale match for session {session_id}, job {job_id}");
    }
    job_match
}
