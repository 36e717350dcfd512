//! The asynchronous scoring pipeline: load submission → resolve backend →
//! run the strategy → validate the result → persist the score.

pub mod queue;

use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::scoring::{ScoringError, ScoringInput, ScoringSelector};
use crate::store::{StoreError, SubmissionStore};

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("submission {0} not found")]
    SubmissionNotFound(Uuid),

    #[error("job posting {0} not found")]
    JobPostingNotFound(Uuid),

    #[error("invalid scoring configuration: {0}")]
    InvalidConfiguration(ScoringError),

    #[error("scoring failed: {0}")]
    ScoringFailed(ScoringError),

    #[error("backend returned an invalid score: {0}")]
    InvalidResult(f64),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("failed to persist score: {0}")]
    Persistence(StoreError),
}

/// Runs the full scoring pipeline for one submission and returns the score
/// that was persisted.
///
/// On any failure the submission is left unscored; no partial state is
/// written. There is no retry here: a re-enqueued submission re-runs the
/// whole pipeline, calls the model provider again (duplicate billing), and
/// its write simply lands last. Anyone adding retry logic upstream should
/// add an idempotency guard ("only score if score is still absent") first.
pub async fn run_scoring_task(
    store: &dyn SubmissionStore,
    selector: &ScoringSelector,
    submission_id: Uuid,
) -> Result<f64, TaskError> {
    let submission = store
        .get_submission(submission_id)
        .await?
        .ok_or(TaskError::SubmissionNotFound(submission_id))?;

    let scorer = selector
        .select(&submission.service)
        .map_err(TaskError::InvalidConfiguration)?;

    let posting = store
        .get_job_posting(submission.job_posting_id)
        .await?
        .ok_or(TaskError::JobPostingNotFound(submission.job_posting_id))?;

    let input = ScoringInput {
        job_description: posting.description,
        resume: submission.resume,
    };

    let score = scorer.score(&input).await.map_err(TaskError::ScoringFailed)?;

    if !score.is_finite() || score < 0.0 {
        return Err(TaskError::InvalidResult(score));
    }

    if let Some(previous) = submission.score {
        // Re-scoring is not modeled; an overwrite means the task ran twice
        // for this submission.
        warn!(%submission_id, previous, new = score, "overwriting existing score");
    }

    store
        .set_score(submission_id, score)
        .await
        .map_err(TaskError::Persistence)?;

    Ok(score)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::models::job_posting::JobPostingRow;
    use crate::models::submission::{NewSubmission, SubmissionRow};
    use crate::scoring::{ScoringError, ScoringInput, SubmissionScorer};
    use crate::store::{StoreError, SubmissionStore};

    /// In-memory store for pipeline tests. `fail_writes` simulates a
    /// persistence failure on `set_score` only.
    #[derive(Default)]
    pub struct MemoryStore {
        pub submissions: Mutex<HashMap<Uuid, SubmissionRow>>,
        pub postings: Mutex<HashMap<Uuid, JobPostingRow>>,
        pub fail_writes: bool,
    }

    impl MemoryStore {
        pub fn with_posting(posting: JobPostingRow) -> Self {
            let store = Self::default();
            store
                .postings
                .lock()
                .unwrap()
                .insert(posting.id, posting);
            store
        }

        pub fn add_submission(&self, row: SubmissionRow) {
            self.submissions.lock().unwrap().insert(row.id, row);
        }

        pub fn submission(&self, id: Uuid) -> Option<SubmissionRow> {
            self.submissions.lock().unwrap().get(&id).cloned()
        }
    }

    #[async_trait]
    impl SubmissionStore for MemoryStore {
        async fn insert_submission(
            &self,
            new: NewSubmission,
        ) -> Result<SubmissionRow, StoreError> {
            let row = new.into_row();
            self.add_submission(row.clone());
            Ok(row)
        }

        async fn get_submission(&self, id: Uuid) -> Result<Option<SubmissionRow>, StoreError> {
            Ok(self.submission(id))
        }

        async fn list_submissions(&self) -> Result<Vec<SubmissionRow>, StoreError> {
            Ok(self.submissions.lock().unwrap().values().cloned().collect())
        }

        async fn set_score(&self, id: Uuid, score: f64) -> Result<(), StoreError> {
            if self.fail_writes {
                return Err(StoreError::Unavailable("writes disabled".to_string()));
            }
            let mut submissions = self.submissions.lock().unwrap();
            if let Some(row) = submissions.get_mut(&id) {
                row.score = Some(score);
            }
            Ok(())
        }

        async fn get_job_posting(&self, id: Uuid) -> Result<Option<JobPostingRow>, StoreError> {
            Ok(self.postings.lock().unwrap().get(&id).cloned())
        }

        async fn list_job_postings(&self) -> Result<Vec<JobPostingRow>, StoreError> {
            Ok(self.postings.lock().unwrap().values().cloned().collect())
        }
    }

    /// Scorer stub returning a fixed value.
    pub struct FixedScorer(pub f64);

    #[async_trait]
    impl SubmissionScorer for FixedScorer {
        async fn score(&self, _input: &ScoringInput) -> Result<f64, ScoringError> {
            Ok(self.0)
        }
    }

    /// Scorer stub returning each value once, in order.
    pub struct SequenceScorer {
        pub scores: Mutex<Vec<f64>>,
    }

    impl SequenceScorer {
        pub fn new(scores: Vec<f64>) -> Self {
            Self {
                scores: Mutex::new(scores),
            }
        }
    }

    #[async_trait]
    impl SubmissionScorer for SequenceScorer {
        async fn score(&self, _input: &ScoringInput) -> Result<f64, ScoringError> {
            let mut scores = self.scores.lock().unwrap();
            Ok(scores.remove(0))
        }
    }

    /// Scorer stub that always fails, as a backend with an unparseable
    /// response would.
    pub struct FailingScorer;

    #[async_trait]
    impl SubmissionScorer for FailingScorer {
        async fn score(&self, _input: &ScoringInput) -> Result<f64, ScoringError> {
            Err(ScoringError::MissingScoreMarker)
        }
    }

    pub fn make_posting() -> JobPostingRow {
        JobPostingRow {
            id: Uuid::new_v4(),
            title: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
            description: "Build and operate APIs in Rust.".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn make_submission(job_posting_id: Uuid, service: &str) -> SubmissionRow {
        SubmissionRow {
            id: Uuid::now_v7(),
            job_posting_id,
            company: "Acme".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone_number: "+15551234567".to_string(),
            resume: "Ten years building backend services.".to_string(),
            service: service.to_string(),
            score: None,
            submitted_at: Utc::now(),
        }
    }
}
