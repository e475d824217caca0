pub mod health;
pub mod sessions;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::jobs::handlers as jobs;
use crate::matching::handlers as matching;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_resume_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/sessions", post(sessions::create_session_handler))
        // Job search
        .route("/api/v1/jobs", get(jobs::handle_list_jobs))
        .route("/api/v1/jobs/search", post(jobs::handle_search_jobs))
        // Resume upload
        .route("/api/v1/resumes", post(resumes::handle_upload_resume))
        .route("/api/v1/resumes/text", post(resumes::handle_upload_resume_text))
        // Matching
        .route("/api/v1/match", post(matching::handle_compute_match))
        .route("/api/v1/matches", post(matching::handle_score_job))
        .route("/api/v1/matches/batch", post(matching::handle_score_all))
        .layer(body_limit)
        .with_state(state)
}
