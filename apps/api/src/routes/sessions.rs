use axum::Json;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: Uuid,
}

/// POST /api/v1/sessions
/// Issues an opaque session id. Nothing is stored until a resume is uploaded.
pub async fn create_session_handler() -> Json<SessionResponse> {
    let session_id = Uuid::new_v4();
    debug!("Issued session {session_id}");
    Json(SessionResponse { session_id })
}
