use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An applicant's submission against a job posting.
///
/// `score` is NULL until the scoring task completes; `id` is a UUIDv7 so
/// rows sort by creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SubmissionRow {
    pub id: Uuid,
    pub job_posting_id: Uuid,
    pub company: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub resume: String,
    pub service: String,
    pub score: Option<f64>,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionRow {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn days_since_submission(&self, now: DateTime<Utc>) -> i64 {
        (now - self.submitted_at).num_days()
    }
}

/// Fields for a new submission. `id`, `company`, and `submitted_at` are
/// assigned server-side at intake, never taken from the request body.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub id: Uuid,
    pub job_posting_id: Uuid,
    pub company: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub resume: String,
    pub service: String,
    pub submitted_at: DateTime<Utc>,
}

impl NewSubmission {
    pub fn into_row(self) -> SubmissionRow {
        SubmissionRow {
            id: self.id,
            job_posting_id: self.job_posting_id,
            company: self.company,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone_number,
            resume: self.resume,
            service: self.service,
            score: None,
            submitted_at: self.submitted_at,
        }
    }
}

/// Read view returned by the listing/detail endpoints: a subset of the row
/// plus the derived `full_name` and `days_since_submission` fields.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReadView {
    pub id: Uuid,
    pub job_posting_id: Uuid,
    pub company: String,
    pub full_name: String,
    pub email: String,
    pub score: Option<f64>,
    pub submitted_at: DateTime<Utc>,
    pub days_since_submission: i64,
}

impl From<&SubmissionRow> for SubmissionReadView {
    fn from(row: &SubmissionRow) -> Self {
        Self {
            id: row.id,
            job_posting_id: row.job_posting_id,
            company: row.company.clone(),
            full_name: row.full_name(),
            email: row.email.clone(),
            score: row.score,
            submitted_at: row.submitted_at,
            days_since_submission: row.days_since_submission(Utc::now()),
        }
    }
}
