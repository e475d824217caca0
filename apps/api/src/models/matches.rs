use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::matching::MatchResult;

/// A cached score of one session's resume against one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatch {
    pub session_id: Uuid,
    pub job_id: String,
    #[serde(flatten)]
    pub result: MatchResult,
    pub scorer_backend: String, // "taxonomy" | "weighted" | "llm"
    pub created_at: DateTime<Utc>,
}
