use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::submission::{NewSubmission, SubmissionReadView, SubmissionRow};
use crate::state::AppState;
use crate::submissions::validate::validate_submission;

#[derive(Debug, Deserialize)]
pub struct CreateSubmissionRequest {
    pub job_posting_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub resume: String,
    pub service: String,
}

#[derive(Debug, Serialize)]
pub struct CreateSubmissionResponse {
    pub message: String,
    pub task_id: Uuid,
    pub submission: SubmissionRow,
}

/// POST /api/v1/submissions
///
/// Persists the submission and schedules the scoring task, returning as
/// soon as the task is enqueued. The response's `task_id` is opaque;
/// callers observe completion by re-reading the submission's score.
pub async fn handle_create_submission(
    State(state): State<AppState>,
    Json(req): Json<CreateSubmissionRequest>,
) -> Result<(StatusCode, Json<CreateSubmissionResponse>), AppError> {
    validate_submission(&req).map_err(AppError::Validation)?;

    let posting = state
        .store
        .get_job_posting(req.job_posting_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job posting not found".to_string()))?;

    let submission = state
        .store
        .insert_submission(NewSubmission {
            id: Uuid::now_v7(),
            job_posting_id: posting.id,
            company: posting.company,
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone_number: req.phone_number,
            resume: req.resume,
            service: req.service,
            submitted_at: Utc::now(),
        })
        .await?;

    let task_id = state
        .queue
        .enqueue(submission.id)
        .map_err(anyhow::Error::from)?;

    Ok((
        StatusCode::CREATED,
        Json(CreateSubmissionResponse {
            message: "Submission received and scoring task started".to_string(),
            task_id,
            submission,
        }),
    ))
}

/// GET /api/v1/submissions
pub async fn handle_list_submissions(
    State(state): State<AppState>,
) -> Result<Json<Vec<SubmissionReadView>>, AppError> {
    let rows = state.store.list_submissions().await?;
    Ok(Json(rows.iter().map(SubmissionReadView::from).collect()))
}

/// GET /api/v1/submissions/:id
pub async fn handle_get_submission(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubmissionReadView>, AppError> {
    let row = state
        .store
        .get_submission(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Submission {id} not found")))?;
    Ok(Json(SubmissionReadView::from(&row)))
}
