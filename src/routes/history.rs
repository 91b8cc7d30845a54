//! Thread history route.

use axum::extract::{Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::assistant::ThreadEntry;
use crate::routes::{ApiError, bad_request, gateway_error};
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub thread_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryMessage {
    pub id: String,
    pub role: String,
    pub content: String,
    pub created_at: i64,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub messages: Vec<HistoryMessage>,
    pub success: bool,
}

fn to_message(entry: ThreadEntry) -> HistoryMessage {
    HistoryMessage { id: entry.id, role: entry.role, content: entry.text, created_at: entry.created_at }
}

/// `GET /api/history?threadId=` — the thread's entries, newest first.
pub async fn thread_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let Some(thread_id) = query.thread_id.filter(|id| !id.is_empty()) else {
        return Err(bad_request("Thread ID is required"));
    };

    let entries = state
        .gateway
        .fetch_history(&thread_id)
        .await
        .map_err(|e| gateway_error(&e))?;

    Ok(Json(HistoryResponse { messages: entries.into_iter().map(to_message).collect(), success: true }))
}

#[cfg(test)]
#[path = "history_test.rs"]
mod tests;
