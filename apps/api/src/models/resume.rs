use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Extracted resume text owned by one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    pub session_id: Uuid,
    pub text: String,
    pub source_media_type: String,
    pub uploaded_at: DateTime<Utc>,
}
