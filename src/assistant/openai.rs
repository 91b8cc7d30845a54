//! OpenAI Assistants v2 thread transport.
//!
//! Thin HTTP wrapper over `/threads`, `/threads/{id}/messages` and
//! `/threads/{id}/runs`. Pure parsing in the `parse_*` functions for
//! testability.

use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::config::GatewayTimeouts;
use super::types::{GatewayError, RunStatus, ThreadEntry};

const ASSISTANTS_BETA_HEADER: &str = "assistants=v2";

// =============================================================================
// CLIENT
// =============================================================================

pub struct OpenAiThreads {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiThreads {
    /// Build the transport with the given credentials and timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::HttpClientBuild`] when the HTTP client cannot
    /// be constructed.
    pub fn new(api_key: String, base_url: String, timeouts: GatewayTimeouts) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| GatewayError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url: base_url.trim_end_matches('/').to_string() })
    }

    async fn post_json(&self, path: &str, body: &impl Serialize) -> Result<String, GatewayError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .header("OpenAI-Beta", ASSISTANTS_BETA_HEADER)
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        read_success_body(response).await
    }

    async fn get_json(&self, path: &str) -> Result<String, GatewayError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.api_key)
            .header("OpenAI-Beta", ASSISTANTS_BETA_HEADER)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        read_success_body(response).await
    }
}

async fn read_success_body(response: reqwest::Response) -> Result<String, GatewayError> {
    let status = response.status().as_u16();
    let text = response
        .text()
        .await
        .map_err(|e| GatewayError::Transport(e.to_string()))?;
    if status != 200 {
        return Err(GatewayError::Api { status, body: text });
    }
    Ok(text)
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct CreateMessageBody<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct CreateRunBody<'a> {
    assistant_id: &'a str,
}

// Empty JSON object body for POST /threads.
#[derive(Serialize)]
struct EmptyBody {}

// =============================================================================
// TRANSPORT IMPL
// =============================================================================

#[async_trait::async_trait]
impl super::types::ThreadTransport for OpenAiThreads {
    async fn create_thread(&self) -> Result<String, GatewayError> {
        let text = self.post_json("/threads", &EmptyBody {}).await?;
        parse_id(&text, "thread")
    }

    async fn add_user_message(&self, thread_id: &str, text: &str) -> Result<(), GatewayError> {
        let body = CreateMessageBody { role: "user", content: text };
        self.post_json(&format!("/threads/{thread_id}/messages"), &body)
            .await?;
        Ok(())
    }

    async fn start_run(&self, thread_id: &str, assistant_id: &str) -> Result<String, GatewayError> {
        let body = CreateRunBody { assistant_id };
        let text = self
            .post_json(&format!("/threads/{thread_id}/runs"), &body)
            .await?;
        parse_id(&text, "run")
    }

    async fn run_status(&self, thread_id: &str, run_id: &str) -> Result<RunStatus, GatewayError> {
        let text = self
            .get_json(&format!("/threads/{thread_id}/runs/{run_id}"))
            .await?;
        parse_run_status(&text)
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadEntry>, GatewayError> {
        let text = self
            .get_json(&format!("/threads/{thread_id}/messages"))
            .await?;
        parse_message_list(&text)
    }
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

pub(crate) fn parse_id(json_text: &str, what: &str) -> Result<String, GatewayError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| GatewayError::Parse(e.to_string()))?;
    root.get("id")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| GatewayError::Parse(format!("{what}: missing id")))
}

pub(crate) fn parse_run_status(json_text: &str) -> Result<RunStatus, GatewayError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| GatewayError::Parse(e.to_string()))?;
    root.get("status")
        .and_then(Value::as_str)
        .map(RunStatus::parse)
        .ok_or_else(|| GatewayError::Parse("run: missing status".to_string()))
}

/// Reduce the provider message list to [`ThreadEntry`] values.
///
/// Each entry's text is the first text-typed content block; entries without
/// one carry an empty string.
pub(crate) fn parse_message_list(json_text: &str) -> Result<Vec<ThreadEntry>, GatewayError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| GatewayError::Parse(e.to_string()))?;
    let Some(data) = root.get("data").and_then(Value::as_array) else {
        return Err(GatewayError::Parse("messages: missing data array".to_string()));
    };

    let mut entries = Vec::with_capacity(data.len());
    for item in data {
        let Some(id) = item.get("id").and_then(Value::as_str) else {
            continue;
        };
        let role = item
            .get("role")
            .and_then(Value::as_str)
            .unwrap_or("assistant");
        let created_at = item
            .get("created_at")
            .and_then(Value::as_i64)
            .unwrap_or(0);
        let text = extract_text(item);
        entries.push(ThreadEntry { id: id.to_owned(), role: role.to_owned(), text, created_at });
    }
    Ok(entries)
}

fn extract_text(item: &Value) -> String {
    let Some(blocks) = item.get("content").and_then(Value::as_array) else {
        return String::new();
    };
    blocks
        .iter()
        .find(|block| block.get("type").and_then(Value::as_str) == Some("text"))
        .and_then(|block| block.get("text"))
        .and_then(|text| text.get("value"))
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_reads_thread_id() {
        let json = serde_json::json!({ "id": "thread_abc", "object": "thread" }).to_string();
        assert_eq!(parse_id(&json, "thread").unwrap(), "thread_abc");
    }

    #[test]
    fn parse_id_missing_is_error() {
        let json = serde_json::json!({ "object": "thread" }).to_string();
        assert!(matches!(parse_id(&json, "thread"), Err(GatewayError::Parse(_))));
    }

    #[test]
    fn parse_run_status_known() {
        let json = serde_json::json!({ "id": "run_1", "status": "in_progress" }).to_string();
        assert_eq!(parse_run_status(&json).unwrap(), RunStatus::InProgress);
    }

    #[test]
    fn parse_run_status_unrecognized_is_nonterminal() {
        let json = serde_json::json!({ "id": "run_1", "status": "warming_up" }).to_string();
        let status = parse_run_status(&json).unwrap();
        assert_eq!(status, RunStatus::Unknown);
        assert!(!status.is_terminal());
    }

    #[test]
    fn parse_message_list_extracts_text_blocks() {
        let json = serde_json::json!({
            "data": [
                {
                    "id": "msg_2",
                    "role": "assistant",
                    "created_at": 200,
                    "content": [
                        { "type": "image_file", "image_file": { "file_id": "file_1" } },
                        { "type": "text", "text": { "value": "the answer", "annotations": [] } }
                    ]
                },
                {
                    "id": "msg_1",
                    "role": "user",
                    "created_at": 100,
                    "content": [{ "type": "text", "text": { "value": "the question", "annotations": [] } }]
                }
            ]
        })
        .to_string();

        let entries = parse_message_list(&json).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "msg_2");
        assert_eq!(entries[0].role, "assistant");
        assert_eq!(entries[0].text, "the answer");
        assert_eq!(entries[0].created_at, 200);
        assert_eq!(entries[1].text, "the question");
    }

    #[test]
    fn parse_message_list_no_text_block_is_empty_string() {
        let json = serde_json::json!({
            "data": [{
                "id": "msg_1",
                "role": "assistant",
                "created_at": 100,
                "content": [{ "type": "image_file", "image_file": { "file_id": "file_1" } }]
            }]
        })
        .to_string();

        let entries = parse_message_list(&json).unwrap();
        assert_eq!(entries[0].text, "");
    }

    #[test]
    fn parse_message_list_missing_data_is_error() {
        let json = serde_json::json!({ "object": "list" }).to_string();
        assert!(matches!(parse_message_list(&json), Err(GatewayError::Parse(_))));
    }
}
