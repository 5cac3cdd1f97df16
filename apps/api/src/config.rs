use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::errors::MalformedRequestPolicy;
use crate::generation::generator::{GenerationSettings, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use crate::llm_client::{DEFAULT_API_URL, DEFAULT_MODEL};
use crate::resources::BasicAuth;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub profile_table: String,
    pub opensearch_url: String,
    pub resource_index: String,
    pub opensearch_auth: Option<BasicAuth>,
    pub anthropic_api_key: String,
    pub anthropic_api_url: String,
    pub llm_model: String,
    pub generation: GenerationSettings,
    pub http_timeout: Duration,
    pub malformed_requests: MalformedRequestPolicy,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let opensearch_auth = match (
            std::env::var("OPENSEARCH_USERNAME").ok(),
            std::env::var("OPENSEARCH_PASSWORD").ok(),
        ) {
            (Some(username), Some(password)) => Some(BasicAuth { username, password }),
            (None, None) => None,
            _ => {
                return Err(anyhow!(
                    "OPENSEARCH_USERNAME and OPENSEARCH_PASSWORD must be set together"
                ))
            }
        };

        let malformed_requests = match std::env::var("MALFORMED_REQUEST_POLICY") {
            Ok(value) => MalformedRequestPolicy::parse(&value).with_context(|| {
                format!(
                    "MALFORMED_REQUEST_POLICY must be 'internal_error' or 'bad_request', got '{value}'"
                )
            })?,
            Err(_) => MalformedRequestPolicy::default(),
        };

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            profile_table: env_or("PROFILE_TABLE", "user_profiles"),
            opensearch_url: require_env("OPENSEARCH_URL")?,
            resource_index: env_or("RESOURCE_INDEX", "learning_resources"),
            opensearch_auth,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            anthropic_api_url: env_or("ANTHROPIC_API_URL", DEFAULT_API_URL),
            llm_model: env_or("LLM_MODEL", DEFAULT_MODEL),
            generation: GenerationSettings {
                max_tokens: parse_env("LLM_MAX_TOKENS", DEFAULT_MAX_TOKENS)?,
                temperature: parse_env("LLM_TEMPERATURE", DEFAULT_TEMPERATURE)?,
            },
            http_timeout: Duration::from_secs(parse_env("HTTP_TIMEOUT_SECS", 30)?),
            malformed_requests,
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}
