//! Axum route handlers for the Resume upload API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{Document, MEDIA_TYPE_TEXT};
use crate::resumes::{store_document, store_text, ResumeUploadResponse};
use crate::state::AppState;

const MISSING_PARTS: &str = "Resume or session missing.";

/// POST /api/v1/resumes
///
/// Multipart form with a `sessionId` text field (`session_id` also accepted)
/// and a `resume` file field. The file's content type picks the extraction
/// path; absent means plain text.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeUploadResponse>, AppError> {
    let mut session_id: Option<String> = None;
    let mut resume: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("sessionId" | "session_id") => session_id = Some(field.text().await?),
            Some("resume") => {
                let media_type = field
                    .content_type()
                    .unwrap_or(MEDIA_TYPE_TEXT)
                    .to_string();
                resume = Some((media_type, field.bytes().await?));
            }
            other => debug!("Ignoring multipart field {other:?}"),
        }
    }

    let (Some(session_id), Some((media_type, bytes))) = (session_id, resume) else {
        return Err(AppError::Validation(MISSING_PARTS.to_string()));
    };
    let session_id = parse_session_id(&session_id)?;

    let response = store_document(&state, session_id, Document::new(media_type, bytes)).await?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeTextUpload {
    pub session_id: Option<Uuid>,
    pub resume_text: Option<String>,
    pub resume_data_uri: Option<String>,
}

/// POST /api/v1/resumes/text
///
/// JSON upload of either raw resume text or a `data:` URI carrying the file.
pub async fn handle_upload_resume_text(
    State(state): State<AppState>,
    Json(upload): Json<ResumeTextUpload>,
) -> Result<Json<ResumeUploadResponse>, AppError> {
    let Some(session_id) = upload.session_id else {
        return Err(AppError::Validation(MISSING_PARTS.to_string()));
    };

    let response = match (upload.resume_text, upload.resume_data_uri) {
        (Some(text), _) if !text.trim().is_empty() => {
            store_text(&state, session_id, text, MEDIA_TYPE_TEXT.to_string()).await?
        }
        (_, Some(uri)) => {
            let document = Document::from_data_uri(&uri)?;
            store_document(&state, session_id, document).await?
        }
        _ => return Err(AppError::Validation(MISSING_PARTS.to_string())),
    };
    Ok(Json(response))
}

fn parse_session_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::Validation(format!("Invalid session id: {raw}")))
}
