use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    pub scoring: ScoringConfig,
}

/// Credentials for the hosted model backends. These are threaded explicitly
/// into the backend constructors at startup; nothing reads them from the
/// environment after this point.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub openai_api_key: String,
    pub replicate_api_token: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            scoring: ScoringConfig {
                openai_api_key: require_env("OPENAI_API_KEY")?,
                replicate_api_token: require_env("REPLICATE_API_TOKEN")?,
            },
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
