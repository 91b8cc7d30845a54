//! Gateway types — provider-neutral thread types and errors.
//!
//! Provider-neutral types shared by the gateway and its transports. The
//! `ThreadTransport` trait is the mocking seam for tests.

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by assistant gateway operations.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the provider failed.
    #[error("API request failed: {0}")]
    Transport(String),

    /// The provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    Api { status: u16, body: String },

    /// The provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// A run reached a terminal non-success status.
    #[error("Run {0}")]
    RunFailed(RunStatus),

    /// The poll budget was exhausted before the run reached a terminal state.
    #[error("Run timed out")]
    RunTimeout,
}

// =============================================================================
// RUN STATUS
// =============================================================================

/// Status of an assistant run against a thread.
///
/// `Completed` is the only terminal success. `Failed`, `Cancelled` and
/// `Expired` are terminal failures. Everything else keeps the poll loop
/// going, including statuses this crate does not know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Completed,
    Failed,
    Cancelled,
    Expired,
    /// Any unrecognized status — treated as non-terminal.
    Unknown,
}

impl RunStatus {
    /// Map a provider status string onto the state machine. Unrecognized
    /// strings become [`RunStatus::Unknown`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "queued" => Self::Queued,
            "in_progress" => Self::InProgress,
            "requires_action" => Self::RequiresAction,
            "cancelling" => Self::Cancelling,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            "cancelled" => Self::Cancelled,
            "expired" => Self::Expired,
            _ => Self::Unknown,
        }
    }

    /// `true` when polling should stop (success or failure).
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled | Self::Expired)
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Queued => "queued",
            Self::InProgress => "in_progress",
            Self::RequiresAction => "requires_action",
            Self::Cancelling => "cancelling",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

// =============================================================================
// THREAD ENTRY
// =============================================================================

/// One entry in a provider thread, reduced to what the chat surface needs.
///
/// Entries without a text-typed content block carry an empty `text`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadEntry {
    pub id: String,
    /// Provider role string: `"user"` or `"assistant"`.
    pub role: String,
    pub text: String,
    /// Provider creation time, unix seconds.
    pub created_at: i64,
}

// =============================================================================
// TRANSPORT TRAIT
// =============================================================================

/// Primitive provider calls the gateway is built from. Enables mocking in
/// tests; the production implementation is [`crate::assistant::openai::OpenAiThreads`].
#[async_trait::async_trait]
pub trait ThreadTransport: Send + Sync {
    /// Create a new empty thread and return its opaque identifier.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on transport or provider failure.
    async fn create_thread(&self) -> Result<String, GatewayError>;

    /// Append a user-authored entry to the thread.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on transport or provider failure.
    async fn add_user_message(&self, thread_id: &str, text: &str) -> Result<(), GatewayError>;

    /// Start a run of the given assistant against the thread.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on transport or provider failure.
    async fn start_run(&self, thread_id: &str, assistant_id: &str) -> Result<String, GatewayError>;

    /// Fetch the current status of a run.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on transport or provider failure.
    async fn run_status(&self, thread_id: &str, run_id: &str) -> Result<RunStatus, GatewayError>;

    /// List the thread's entries. Provider order is not relied upon; callers
    /// sort by `created_at` themselves.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on transport or provider failure.
    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadEntry>, GatewayError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
