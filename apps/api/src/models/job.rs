use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A job posting as stored for the current search. `id` is the apply link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub apply_url: String,
    pub created_at: DateTime<Utc>,
}
