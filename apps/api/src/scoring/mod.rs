//! Scoring strategies — pluggable model backends behind a fixed
//! prompt → model → extract pipeline.
//!
//! Each backend implements the three-step `ScoringStrategy` contract; the
//! `score_submission` composition is a default trait method and is never
//! overridden. The `ScoringSelector` maps a submission's declared `service`
//! name to a backend constructed at startup from explicit configuration.

pub mod llama;
pub mod openai;
pub mod prompts;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::ScoringConfig;
use crate::scoring::llama::LlamaScorer;
use crate::scoring::openai::OpenAiScorer;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("model response contains no SCORE marker")]
    MissingScoreMarker,

    #[error("score token is not an integer: {0:?}")]
    InvalidScoreToken(String),

    #[error("model returned empty content")]
    EmptyContent,

    #[error("no scoring backend registered for service {0:?}")]
    UnknownService(String),
}

/// What a backend needs to know about a submission: the posting's
/// description and the applicant's resume text.
#[derive(Debug, Clone)]
pub struct ScoringInput {
    pub job_description: String,
    pub resume: String,
}

/// The three-operation strategy contract.
///
/// `run_model` is the only operation that performs network I/O; its failures
/// propagate unchanged (no retry, no timeout). `extract_score` must fail
/// loudly when the marker is absent or non-numeric — never default a score.
#[async_trait]
pub trait ScoringStrategy: Send + Sync {
    /// Native response shape of the backend's hosted API.
    type Response: Send;

    fn create_prompt(&self, input: &ScoringInput) -> String;

    async fn run_model(&self, prompt: &str) -> Result<Self::Response, ScoringError>;

    fn extract_score(&self, response: &Self::Response) -> Result<i64, ScoringError>;

    /// Template method: prompt → model → extract. The ordering and
    /// composition are fixed; only the three sub-steps vary per backend.
    async fn score_submission(&self, input: &ScoringInput) -> Result<i64, ScoringError> {
        let prompt = self.create_prompt(input);
        let response = self.run_model(&prompt).await?;
        self.extract_score(&response)
    }
}

/// Object-safe view over a strategy, so the selector can hold backends with
/// different `Response` types behind a single `Arc<dyn SubmissionScorer>`.
#[async_trait]
pub trait SubmissionScorer: Send + Sync {
    async fn score(&self, input: &ScoringInput) -> Result<f64, ScoringError>;
}

impl std::fmt::Debug for dyn SubmissionScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SubmissionScorer")
    }
}

#[async_trait]
impl<S: ScoringStrategy> SubmissionScorer for S {
    async fn score(&self, input: &ScoringInput) -> Result<f64, ScoringError> {
        Ok(self.score_submission(input).await? as f64)
    }
}

/// Maps a submission's declared `service` name to a constructed backend.
///
/// The backend set is closed at construction; an unknown name is a hard
/// `UnknownService` error, never a silent fallback.
pub struct ScoringSelector {
    backends: HashMap<String, Arc<dyn SubmissionScorer>>,
}

impl ScoringSelector {
    /// The production backend set: OpenAI (needs an API key) and Llama
    /// (needs a Replicate token). Clients are built once and reused across
    /// scoring tasks.
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::from_backends([
            (
                "openai".to_string(),
                Arc::new(OpenAiScorer::new(config.openai_api_key.clone()))
                    as Arc<dyn SubmissionScorer>,
            ),
            (
                "llama".to_string(),
                Arc::new(LlamaScorer::new(config.replicate_api_token.clone()))
                    as Arc<dyn SubmissionScorer>,
            ),
        ])
    }

    pub fn from_backends(
        backends: impl IntoIterator<Item = (String, Arc<dyn SubmissionScorer>)>,
    ) -> Self {
        Self {
            backends: backends.into_iter().collect(),
        }
    }

    pub fn select(&self, service: &str) -> Result<Arc<dyn SubmissionScorer>, ScoringError> {
        self.backends
            .get(service)
            .cloned()
            .ok_or_else(|| ScoringError::UnknownService(service.to_string()))
    }

    /// Registered service names, sorted, for startup logging.
    pub fn services(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.backends.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
