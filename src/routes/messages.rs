//! Message send route — the send-and-await round-trip.

use axum::extract::State;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::routes::{ApiError, bad_request, gateway_error};
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageBody {
    pub thread_id: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub thread_id: String,
    /// The assistant's reply text.
    pub message: String,
    pub success: bool,
}

/// `POST /api/messages` — submit a user message and await the assistant
/// reply. Suspends for up to the gateway's poll budget (~60s).
pub async fn send_message(
    State(state): State<AppState>,
    Json(body): Json<SendMessageBody>,
) -> Result<Json<SendMessageResponse>, ApiError> {
    let (Some(thread_id), Some(message)) = (body.thread_id, body.message) else {
        return Err(bad_request("Thread ID and message are required"));
    };
    if thread_id.is_empty() || message.is_empty() {
        return Err(bad_request("Thread ID and message are required"));
    }

    let reply = state
        .gateway
        .send_and_await_reply(&thread_id, &message)
        .await
        .map_err(|e| gateway_error(&e))?;

    Ok(Json(SendMessageResponse { thread_id, message: reply, success: true }))
}

#[cfg(test)]
#[path = "messages_test.rs"]
mod tests;
