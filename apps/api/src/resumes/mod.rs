// Resume intake: extract text from an uploaded document and store it per session.

pub mod handlers;

use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::Document;
use crate::models::resume::ResumeRecord;
use crate::state::AppState;

pub const UPLOAD_OK_MESSAGE: &str = "Resume uploaded successfully.";

const SWEEP_INTERVAL: Duration = Duration::from_secs(15 * 60);

#[derive(Debug, Serialize)]
pub struct ResumeUploadResponse {
    pub message: String,
    pub characters: usize,
}

/// Extracts and stores the resume text for `session_id`. Nothing is stored if
/// extraction fails. A new resume invalidates the session's cached scores.
pub async fn store_document(
    state: &AppState,
    session_id: Uuid,
    document: Document,
) -> Result<ResumeUploadResponse, AppError> {
    let text = state.extractor.extract_text(&document).await?;
    store_text(state, session_id, text, document.essence()).await
}

pub async fn store_text(
    state: &AppState,
    session_id: Uuid,
    text: String,
    source_media_type: String,
) -> Result<ResumeUploadResponse, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation("Resume text cannot be empty.".to_string()));
    }

    let characters = text.chars().count();
    state
        .resumes
        .put(ResumeRecord {
            session_id,
            text,
            source_media_type,
            uploaded_at: Utc::now(),
        })
        .await;
    state.matches.invalidate_session(session_id).await;

    info!("Stored resume for session {session_id} ({characters} characters)");
    Ok(ResumeUploadResponse {
        message: UPLOAD_OK_MESSAGE.to_string(),
        characters,
    })
}

/// Drops resumes uploaded more than `ttl` ago together with their cached
/// matches. Returns the number of sessions removed.
pub async fn sweep_expired_sessions(state: &AppState, ttl: Duration) -> usize {
    let ttl = match chrono::Duration::from_std(ttl) {
        Ok(ttl) => ttl,
        Err(e) => {
            warn!("Session TTL out of range, skipping sweep: {e}");
            return 0;
        }
    };
    let expired = state.resumes.remove_uploaded_before(Utc::now() - ttl).await;
    state.matches.forget_sessions(&expired).await;
    expired.len()
}

/// Runs [`sweep_expired_sessions`] every 15 minutes. `None` when the TTL is 0.
pub fn spawn_session_sweeper(state: AppState) -> Option<JoinHandle<()>> {
    let ttl = Duration::from_secs(state.config.session_ttl_secs);
    if ttl.is_zero() {
        info!("Session sweep disabled (SESSION_TTL_SECS=0)");
        return None;
    }

    Some(tokio::spawn(async move {
        let mut interval = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let removed = sweep_expired_sessions(&state, ttl).await;
            if removed > 0 {
                info!("Swept {removed} expired sessions");
            }
        }
    }))
}
