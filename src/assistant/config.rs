//! Assistant gateway configuration parsed from environment variables.

use super::types::GatewayError;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;
pub const DEFAULT_POLL_MAX_ATTEMPTS: u32 = 30;

/// Assistant id of the original deployment; overridden via `ASSISTANT_ID`.
pub const DEFAULT_ASSISTANT_ID: &str = "asst_V6h7cG2GvnjnurFBMX4QpHxZ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatewayTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantConfig {
    pub api_key: String,
    pub assistant_id: String,
    pub base_url: String,
    pub timeouts: GatewayTimeouts,
    pub poll_interval_ms: u64,
    pub poll_max_attempts: u32,
}

impl AssistantConfig {
    /// Build typed gateway config from environment variables.
    ///
    /// Required:
    /// - `OPENAI_API_KEY`
    ///
    /// Optional:
    /// - `ASSISTANT_ID`: preconfigured assistant to run (deployment default when absent)
    /// - `OPENAI_BASE_URL`: default OpenAI API base URL
    /// - `ASSISTANT_REQUEST_TIMEOUT_SECS`: default 120
    /// - `ASSISTANT_CONNECT_TIMEOUT_SECS`: default 10
    /// - `ASSISTANT_POLL_INTERVAL_MS`: default 2000
    /// - `ASSISTANT_POLL_MAX_ATTEMPTS`: default 30
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MissingApiKey`] when `OPENAI_API_KEY` is unset.
    pub fn from_env() -> Result<Self, GatewayError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| GatewayError::MissingApiKey { var: "OPENAI_API_KEY".into() })?;

        let assistant_id = std::env::var("ASSISTANT_ID").unwrap_or_else(|_| DEFAULT_ASSISTANT_ID.to_string());
        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let timeouts = GatewayTimeouts {
            request_secs: env_parse_u64("ASSISTANT_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("ASSISTANT_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        let poll_interval_ms = env_parse_u64("ASSISTANT_POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL_MS);
        let poll_max_attempts = env_parse_u32("ASSISTANT_POLL_MAX_ATTEMPTS", DEFAULT_POLL_MAX_ATTEMPTS);

        Ok(Self { api_key, assistant_id, base_url, timeouts, poll_interval_ms, poll_max_attempts })
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_parse_u32(key: &str, default: u32) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
