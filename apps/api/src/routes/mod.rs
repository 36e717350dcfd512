pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::job_postings;
use crate::state::AppState;
use crate::submissions::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/submissions",
            post(handlers::handle_create_submission).get(handlers::handle_list_submissions),
        )
        .route(
            "/api/v1/submissions/:id",
            get(handlers::handle_get_submission),
        )
        .route(
            "/api/v1/job-postings",
            get(job_postings::handle_list_job_postings),
        )
        .route(
            "/api/v1/job-postings/:id",
            get(job_postings::handle_get_job_posting),
        )
        .with_state(state)
}
