//! Assistant gateway — typed client over a hosted conversation-thread API.
//!
//! DESIGN
//! ======
//! The gateway translates three logical operations (create thread, send and
//! await reply, fetch history) into primitive calls on a [`ThreadTransport`].
//! The only waiting logic it owns is the bounded run-poll loop in
//! [`AssistantGateway::send_and_await_reply`]: a fixed sleep between status
//! checks, a fixed attempt budget, no retries beyond that and no
//! cancellation once a run has started.

pub mod config;
pub mod openai;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use config::AssistantConfig;
pub use types::{GatewayError, RunStatus, ThreadEntry, ThreadTransport};

// =============================================================================
// GATEWAY
// =============================================================================

/// Gateway to the hosted assistant provider.
///
/// Built from environment variables by [`AssistantGateway::from_env`], or
/// over any [`ThreadTransport`] (tests inject a mock here).
pub struct AssistantGateway {
    transport: Arc<dyn ThreadTransport>,
    assistant_id: String,
    poll_interval: Duration,
    poll_max_attempts: u32,
}

impl AssistantGateway {
    /// Build a gateway from environment variables (see [`AssistantConfig`]).
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails
    /// to build.
    pub fn from_env() -> Result<Self, GatewayError> {
        let config = AssistantConfig::from_env()?;
        let transport = openai::OpenAiThreads::new(config.api_key, config.base_url, config.timeouts)?;
        Ok(Self {
            transport: Arc::new(transport),
            assistant_id: config.assistant_id,
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            poll_max_attempts: config.poll_max_attempts,
        })
    }

    /// Build a gateway over an explicit transport with default poll timing.
    #[must_use]
    pub fn new(transport: Arc<dyn ThreadTransport>, assistant_id: impl Into<String>) -> Self {
        Self {
            transport,
            assistant_id: assistant_id.into(),
            poll_interval: Duration::from_millis(config::DEFAULT_POLL_INTERVAL_MS),
            poll_max_attempts: config::DEFAULT_POLL_MAX_ATTEMPTS,
        }
    }

    /// Override poll timing (interval between status checks, attempt budget).
    #[must_use]
    pub fn with_polling(mut self, interval: Duration, max_attempts: u32) -> Self {
        self.poll_interval = interval;
        self.poll_max_attempts = max_attempts;
        self
    }

    /// Create a new provider thread and return its opaque identifier.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on transport or provider failure.
    pub async fn create_thread(&self) -> Result<String, GatewayError> {
        let thread_id = self.transport.create_thread().await?;
        info!(%thread_id, "gateway: thread created");
        Ok(thread_id)
    }

    /// Submit `text` to the thread, run the configured assistant, and await
    /// its reply.
    ///
    /// Polls run status at a fixed interval up to the attempt budget. On
    /// `completed`, returns the text of the most recent assistant entry
    /// (empty when that entry has no text block).
    ///
    /// # Errors
    ///
    /// - [`GatewayError::RunFailed`] when the run ends `failed`, `cancelled`
    ///   or `expired` (no further polling).
    /// - [`GatewayError::RunTimeout`] when the attempt budget is exhausted
    ///   without a terminal status.
    /// - Any transport error from the underlying calls.
    pub async fn send_and_await_reply(&self, thread_id: &str, text: &str) -> Result<String, GatewayError> {
        self.transport.add_user_message(thread_id, text).await?;
        let run_id = self
            .transport
            .start_run(thread_id, &self.assistant_id)
            .await?;
        info!(%thread_id, %run_id, "gateway: run started");

        for attempt in 0..self.poll_max_attempts {
            let status = self.transport.run_status(thread_id, &run_id).await?;
            match status {
                RunStatus::Completed => {
                    info!(%thread_id, %run_id, attempt, "gateway: run completed");
                    return self.latest_assistant_text(thread_id).await;
                }
                RunStatus::Failed | RunStatus::Cancelled | RunStatus::Expired => {
                    warn!(%thread_id, %run_id, %status, attempt, "gateway: run ended without reply");
                    return Err(GatewayError::RunFailed(status));
                }
                _ => tokio::time::sleep(self.poll_interval).await,
            }
        }

        warn!(%thread_id, %run_id, attempts = self.poll_max_attempts, "gateway: poll budget exhausted");
        Err(GatewayError::RunTimeout)
    }

    /// Fetch the thread's entries in reverse-chronological order (newest
    /// first).
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on transport or provider failure.
    pub async fn fetch_history(&self, thread_id: &str) -> Result<Vec<ThreadEntry>, GatewayError> {
        let mut entries = self.transport.list_messages(thread_id).await?;
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }

    async fn latest_assistant_text(&self, thread_id: &str) -> Result<String, GatewayError> {
        let mut entries = self.transport.list_messages(thread_id).await?;
        entries.retain(|entry| entry.role == "assistant");
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries.into_iter().next().map(|e| e.text).unwrap_or_default())
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
