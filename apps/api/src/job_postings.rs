//! Read-only job-posting endpoints. Postings are managed out of band
//! (seeded via SQL or admin tooling); this service never writes them.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job_posting::JobPostingRow;
use crate::state::AppState;

/// GET /api/v1/job-postings
pub async fn handle_list_job_postings(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobPostingRow>>, AppError> {
    let rows = state.store.list_job_postings().await?;
    Ok(Json(rows))
}

/// GET /api/v1/job-postings/:id
pub async fn handle_get_job_posting(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobPostingRow>, AppError> {
    let row = state
        .store
        .get_job_posting(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job posting {id} not found")))?;
    Ok(Json(row))
}
