use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
///
/// Engine-level knobs (weights, thresholds, allow-lists) are NOT here — they
/// are explicit config structs passed to the engines at construction.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Optional: without it the remote scoring tier is disabled and all
    /// engines run rule-based only.
    pub anthropic_api_key: Option<String>,
    /// Directory where the upload pipeline drops pre-extracted document text.
    pub document_text_dir: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            document_text_dir: std::env::var("DOCUMENT_TEXT_DIR")
                .unwrap_or_else(|_| "document_text".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
