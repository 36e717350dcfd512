use std::sync::Arc;

use crate::store::SubmissionStore;
use crate::tasks::queue::TaskQueue;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SubmissionStore>,
    /// Handle to the scoring worker; intake handlers enqueue and move on.
    /// Completion is observed by re-reading the submission's score.
    pub queue: TaskQueue,
}
