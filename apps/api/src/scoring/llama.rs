//! Llama scoring backend — a single blocking prediction against Replicate's
//! hosted meta-llama-3-70b-instruct model. The response arrives as a
//! sequence of text tokens, and the score is read at a fixed offset from
//! the literal `SCORE` token.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::scoring::prompts::{
    LLAMA_PROMPT_TEMPLATE, LLAMA_STOP_SEQUENCES, SCORING_SYSTEM_PROMPT,
};
use crate::scoring::{ScoringError, ScoringInput, ScoringStrategy};

const REPLICATE_API_URL: &str =
    "https://api.replicate.com/v1/models/meta/meta-llama-3-70b-instruct/predictions";

#[derive(Debug, Serialize)]
struct PredictionRequest<'a> {
    input: PredictionInput<'a>,
}

#[derive(Debug, Serialize)]
struct PredictionInput<'a> {
    top_k: u32,
    top_p: f32,
    prompt: &'a str,
    max_tokens: u32,
    min_tokens: u32,
    temperature: f32,
    system_prompt: &'a str,
    length_penalty: f32,
    stop_sequences: &'a str,
    prompt_template: &'a str,
    presence_penalty: f32,
    log_performance_metrics: bool,
}

#[derive(Debug, Deserialize)]
pub struct Prediction {
    #[serde(default)]
    pub output: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReplicateApiError {
    detail: String,
}

pub struct LlamaScorer {
    client: Client,
    api_token: String,
}

impl LlamaScorer {
    /// The Replicate token is injected here, never read from ambient
    /// settings. No timeout on the client; a hung prediction hangs the
    /// scoring task (known gap, same as the OpenAI backend).
    pub fn new(api_token: String) -> Self {
        Self {
            client: Client::new(),
            api_token,
        }
    }
}

#[async_trait]
impl ScoringStrategy for LlamaScorer {
    type Response = Prediction;

    fn create_prompt(&self, input: &ScoringInput) -> String {
        format!(
            "Job Description: {}\n\n***Resume***: {}\n\nScore the applicant's suitability for the job on a scale of 0-100. ***Resume*** denotes the start of the applicants resume. Only return one score in this format: ***SCORE: 0***. Provide feedback after the score.",
            input.job_description, input.resume
        )
    }

    async fn run_model(&self, prompt: &str) -> Result<Prediction, ScoringError> {
        let request_body = PredictionRequest {
            input: PredictionInput {
                top_k: 0,
                top_p: 0.9,
                prompt,
                max_tokens: 512,
                min_tokens: 0,
                temperature: 0.6,
                system_prompt: SCORING_SYSTEM_PROMPT,
                length_penalty: 0.5,
                stop_sequences: LLAMA_STOP_SEQUENCES,
                prompt_template: LLAMA_PROMPT_TEMPLATE,
                presence_penalty: 1.15,
                log_performance_metrics: false,
            },
        };

        // `Prefer: wait` makes the predictions endpoint block until the
        // model finishes, so one round trip yields the full token stream.
        let response = self
            .client
            .post(REPLICATE_API_URL)
            .bearer_auth(&self.api_token)
            .header("Prefer", "wait")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ReplicateApiError>(&body)
                .map(|e| e.detail)
                .unwrap_or(body);
            return Err(ScoringError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let prediction: Prediction = response.json().await?;
        if let Some(error) = prediction.error {
            return Err(ScoringError::Api {
                status: status.as_u16(),
                message: error,
            });
        }

        Ok(prediction)
    }

    fn extract_score(&self, response: &Prediction) -> Result<i64, ScoringError> {
        if response.output.is_empty() {
            return Err(ScoringError::EmptyContent);
        }
        extract_score_token(&response.output)
    }
}

/// Locates the literal token `"SCORE"` and parses the token exactly three
/// positions later. The offset matches how the model tokenizes the
/// instructed `***SCORE: N***` format (`"***"`, `"SCORE"`, `":"`, `" "`,
/// `"73"`). This fixed-offset lookup is brittle by contract: any other
/// response shape is an error, not a guess.
pub(crate) fn extract_score_token(tokens: &[String]) -> Result<i64, ScoringError> {
    let score_index = tokens
        .iter()
        .position(|t| t == "SCORE")
        .ok_or(ScoringError::MissingScoreMarker)?;
    let token = tokens
        .get(score_index + 3)
        .ok_or(ScoringError::MissingScoreMarker)?;
    token
        .trim()
        .parse::<i64>()
        .map_err(|_| ScoringError::InvalidScoreToken(token.clone()))
}
