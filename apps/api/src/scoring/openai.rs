//! OpenAI scoring backend — a two-message chat-completion exchange against
//! the hosted chat API, with the score returned on a `SCORE:` line.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::scoring::prompts::SCORING_SYSTEM_PROMPT;
use crate::scoring::{ScoringError, ScoringInput, ScoringStrategy};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const MODEL: &str = "gpt-3.5-turbo";
const MAX_TOKENS: u32 = 512;
const TEMPERATURE: f32 = 0.6;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletion {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponseMessage {
    pub content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiApiError {
    error: OpenAiApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiApiErrorBody {
    message: String,
}

pub struct OpenAiScorer {
    client: Client,
    api_key: String,
}

impl OpenAiScorer {
    /// The API key is injected here, never read from ambient settings. The
    /// client carries no timeout: a hung API call hangs the scoring task
    /// (known gap; adding a timeout is a hardening, not the contract).
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl ScoringStrategy for OpenAiScorer {
    type Response = ChatCompletion;

    fn create_prompt(&self, input: &ScoringInput) -> String {
        format!(
            "Job Description: {}\n\n***Resume***: {}\n\nScore the applicant's suitability for the job on a scale of 0-100. ***Resume*** denotes the start of the applicant's resume. Only return one score on its own line in this format: SCORE: 0. Provide feedback after the score.",
            input.job_description, input.resume
        )
    }

    async fn run_model(&self, prompt: &str) -> Result<ChatCompletion, ScoringError> {
        let request_body = ChatRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SCORING_SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OpenAiApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(ScoringError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    fn extract_score(&self, response: &ChatCompletion) -> Result<i64, ScoringError> {
        let content = response
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or(ScoringError::EmptyContent)?;
        extract_score_line(content)
    }
}

/// Scans the response for the first line starting with `SCORE:`, splits on
/// the first colon, trims, and parses the remainder as an integer. Trailing
/// feedback text is ignored; a missing line or non-numeric remainder is an
/// error, never a default.
pub(crate) fn extract_score_line(content: &str) -> Result<i64, ScoringError> {
    let line = content
        .lines()
        .find(|line| line.starts_with("SCORE:"))
        .ok_or(ScoringError::MissingScoreMarker)?;
    let (_, rest) = line.split_once(':').ok_or(ScoringError::MissingScoreMarker)?;
    let token = rest.trim();
    token
        .parse::<i64>()
        .map_err(|_| ScoringError::InvalidScoreToken(token.to_string()))
}
