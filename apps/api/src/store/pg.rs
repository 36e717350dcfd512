use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::job_posting::JobPostingRow;
use crate::models::submission::{NewSubmission, SubmissionRow};
use crate::store::{StoreError, SubmissionStore};

/// PostgreSQL-backed store. Single-row reads and writes only; no
/// transactional coordination beyond what a single UPDATE provides.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionStore for PgStore {
    async fn insert_submission(&self, new: NewSubmission) -> Result<SubmissionRow, StoreError> {
        let row = sqlx::query_as::<_, SubmissionRow>(
            r#"
            INSERT INTO submissions
                (id, job_posting_id, company, first_name, last_name, email,
                 phone_number, resume, service, submitted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(new.id)
        .bind(new.job_posting_id)
        .bind(new.company)
        .bind(new.first_name)
        .bind(new.last_name)
        .bind(new.email)
        .bind(new.phone_number)
        .bind(new.resume)
        .bind(new.service)
        .bind(new.submitted_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn get_submission(&self, id: Uuid) -> Result<Option<SubmissionRow>, StoreError> {
        let row = sqlx::query_as::<_, SubmissionRow>("SELECT * FROM submissions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_submissions(&self) -> Result<Vec<SubmissionRow>, StoreError> {
        let rows = sqlx::query_as::<_, SubmissionRow>(
            "SELECT * FROM submissions ORDER BY submitted_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn set_score(&self, id: Uuid, score: f64) -> Result<(), StoreError> {
        sqlx::query("UPDATE submissions SET score = $1 WHERE id = $2")
            .bind(score)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get_job_posting(&self, id: Uuid) -> Result<Option<JobPostingRow>, StoreError> {
        let row = sqlx::query_as::<_, JobPostingRow>("SELECT * FROM job_postings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_job_postings(&self) -> Result<Vec<JobPostingRow>, StoreError> {
        let rows = sqlx::query_as::<_, JobPostingRow>(
            "SELECT * FROM job_postings ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
