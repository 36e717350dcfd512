//! Persistence boundary for submissions and (read-only) job postings.
//!
//! Handlers and the scoring task depend on the `SubmissionStore` trait, not
//! on sqlx, so the scoring pipeline is testable against an in-memory store.

pub mod pg;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::job_posting::JobPostingRow;
use crate::models::submission::{NewSubmission, SubmissionRow};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn insert_submission(&self, new: NewSubmission) -> Result<SubmissionRow, StoreError>;

    async fn get_submission(&self, id: Uuid) -> Result<Option<SubmissionRow>, StoreError>;

    async fn list_submissions(&self) -> Result<Vec<SubmissionRow>, StoreError>;

    /// Writes `score` onto an existing submission. Last write wins; there is
    /// deliberately no guard against overwriting an already-present score.
    async fn set_score(&self, id: Uuid, score: f64) -> Result<(), StoreError>;

    async fn get_job_posting(&self, id: Uuid) -> Result<Option<JobPostingRow>, StoreError>;

    async fn list_job_postings(&self) -> Result<Vec<JobPostingRow>, StoreError>;
}
