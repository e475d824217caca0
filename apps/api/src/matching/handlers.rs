//! Axum route handlers for the Matching API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::service::{score_all_jobs, score_job, BatchEntry};
use crate::matching::{MatchRequest, MatchResult};
use crate::models::matches::JobMatch;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionJobRequest {
    pub session_id: Uuid,
    pub job_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub results: Vec<BatchEntry>,
}

/// POST /api/v1/match
///
/// Runs the matching engine on caller-supplied text. Falls back to the
/// configured policy when none is given.
pub async fn handle_compute_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResult>, AppError> {
    let (resume, job) = request.validate()?;
    let policy = request.policy()?.unwrap_or(state.config.match_policy);
    let result = state.engine.compute_match(resume, job, policy)?;
    Ok(Json(result))
}

/// POST /api/v1/matches
pub async fn handle_score_job(
    State(state): State<AppState>,
    Json(request): Json<SessionJobRequest>,
) -> Result<Json<JobMatch>, AppError> {
    if request.job_id.trim().is_empty() {
        return Err(AppError::Validation("jobId cannot be empty".to_string()));
    }
    let job_match = score_job(&state, request.session_id, &request.job_id).await?;
    Ok(Json(job_match))
}

/// POST /api/v1/matches/batch
pub async fn handle_score_all(
    State(state): State<AppState>,
    Json(request): Json<SessionRequest>,
) -> Result<Json<BatchResponse>, AppError> {
    let results = score_all_jobs(&state, request.session_id).await?;
    Ok(Json(BatchResponse { results }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::matching::keywords::KeywordExtractor;
    use crate::matching::scorer::KeywordScorer;
    use crate::matching::weights::WeightingPolicy;
    use crate::matching::{MatchEngine, MatchError, MatchPolicy};
    use crate::models::resume::ResumeRecord;
    use crate::test_support::{sample_job, test_state};

    #[tokio::test]
    async fn test_compute_match_rejects_unknown_policy() {
        let err = handle_compute_match(
            State(test_state()),
            Json(MatchRequest {
                resume_text: Some("rust".to_string()),
                job_description: Some("rust".to_string()),
                policy: Some("semantic".to_string()),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Match(MatchError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_batch_with_every_job_failing_still_succeeds() {
        let engine = Arc::new(MatchEngine::new(
            None,
            KeywordExtractor::default(),
            WeightingPolicy::default(),
        ));
        let state = AppState {
            scorer: Arc::new(KeywordScorer::new(engine, MatchPolicy::Taxonomy)),
            ..test_state()
        };
        let session_id = Uuid::new_v4();
        state
            .resumes
            .put(ResumeRecord {
                session_id,
                text: "React and SQL".to_string(),
                source_media_type: "text/plain".to_string(),
                uploaded_at: chrono::Utc::now(),
            })
            .await;
        state
            .jobs
            .replace_all(vec![sample_job("j1", "React"), sample_job("j2", "SQL")])
            .await;

        let Json(response) = handle_score_all(State(state), Json(SessionRequest { session_id }))
            .await
            .unwrap();

        assert_eq!(response.results.len(), 2);
        for entry in &response.results {
            assert!(entry.job_match.is_none());
            assert!(entry.error.as_deref().unwrap().contains("skill taxonomy unavailable"));
        }
        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["results"][0]["jobId"], "j1");
        assert!(body["results"][0]["match"].is_null());
    }
}
