//! In-process job queue for deferred scoring work.
//!
//! Intake handlers enqueue and return immediately; a background worker
//! drains the channel and runs the pipeline. Nothing deduplicates jobs:
//! if the same submission is enqueued twice, the pipeline runs twice and
//! the last write wins.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info};
use uuid::Uuid;

use crate::scoring::ScoringSelector;
use crate::store::SubmissionStore;
use crate::tasks::run_scoring_task;

#[derive(Debug, Clone)]
pub struct ScoreJob {
    pub task_id: Uuid,
    pub submission_id: Uuid,
}

#[derive(Debug, thiserror::Error)]
#[error("scoring queue is closed")]
pub struct QueueClosed;

/// Handle for enqueueing scoring jobs. Cheap to clone; held in `AppState`.
#[derive(Clone)]
pub struct TaskQueue {
    tx: mpsc::UnboundedSender<ScoreJob>,
}

impl TaskQueue {
    /// Schedules scoring for a submission and returns an opaque task id
    /// immediately. The id is for log correlation only; completion is
    /// observed by re-reading the submission's score.
    pub fn enqueue(&self, submission_id: Uuid) -> Result<Uuid, QueueClosed> {
        let task_id = Uuid::new_v4();
        self.tx
            .send(ScoreJob {
                task_id,
                submission_id,
            })
            .map_err(|_| QueueClosed)?;
        Ok(task_id)
    }
}

/// Spawns the scoring worker and returns the queue handle feeding it.
/// Task failures are logged, not retried; the submission stays unscored
/// until something re-enqueues it.
pub fn spawn_worker(
    store: Arc<dyn SubmissionStore>,
    selector: Arc<ScoringSelector>,
) -> TaskQueue {
    let (tx, mut rx) = mpsc::unbounded_channel::<ScoreJob>();

    tokio::spawn(async move {
        while let Some(job) = rx.recv().await {
            let ScoreJob {
                task_id,
                submission_id,
            } = job;
            info!(%task_id, %submission_id, "scoring task started");
            match run_scoring_task(store.as_ref(), &selector, submission_id).await {
                Ok(score) => {
                    info!(%task_id, %submission_id, score, "scoring task finished")
                }
                Err(e) => error!(%task_id, %submission_id, "scoring task failed: {e}"),
            }
        }
    });

    TaskQueue { tx }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::tasks::testing::{make_posting, make_submission, FixedScorer, MemoryStore};

    async fn wait_for_score(store: &MemoryStore, id: Uuid) -> Option<f64> {
        for _ in 0..100 {
            if let Some(score) = store.submission(id).and_then(|s| s.score) {
                return Some(score);
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        None
    }

    #[tokio::test]
    async fn test_enqueued_job_is_scored_by_worker() {
        let posting = make_posting();
        let submission = make_submission(posting.id, "stub");
        let store = Arc::new(MemoryStore::with_posting(posting));
        store.add_submission(submission.clone());
        let selector = Arc::new(ScoringSelector::from_backends([(
            "stub".to_string(),
            Arc::new(FixedScorer(77.0)) as Arc<dyn crate::scoring::SubmissionScorer>,
        )]));

        let queue = spawn_worker(store.clone(), selector);
        queue.enqueue(submission.id).unwrap();

        assert_eq!(wait_for_score(&store, submission.id).await, Some(77.0));
    }

    #[tokio::test]
    async fn test_enqueue_returns_distinct_task_ids() {
        let store = Arc::new(MemoryStore::default());
        let selector = Arc::new(ScoringSelector::from_backends([]));
        let queue = spawn_worker(store, selector);

        let a = queue.enqueue(Uuid::new_v4()).unwrap();
        let b = queue.enqueue(Uuid::new_v4()).unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_failed_job_leaves_submission_unscored() {
        let posting = make_posting();
        // Declared service has no registered backend; the worker logs the
        // failure and moves on.
        let submission = make_submission(posting.id, "gemini");
        let store = Arc::new(MemoryStore::with_posting(posting));
        store.add_submission(submission.clone());
        let selector = Arc::new(ScoringSelector::from_backends([]));

        let queue = spawn_worker(store.clone(), selector);
        queue.enqueue(submission.id).unwrap();

        assert_eq!(wait_for_score(&store, submission.id).await, None);
        assert_eq!(store.submission(submission.id).unwrap().score, None);
    }
}
