//! Per-channel chat catalog routes.
//!
//! Chats are served from the in-process conversation store: ephemeral,
//! process lifetime, no database behind them.

use axum::extract::{Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::routes::{ApiError, bad_request, gateway_error, not_found};
use crate::services::conversation::StoreError;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListChatsQuery {
    pub channel_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummary {
    pub id: String,
    pub name: String,
    pub last_activity: i64,
}

#[derive(Debug, Serialize)]
pub struct ListChatsResponse {
    pub chats: Vec<ChatSummary>,
    pub success: bool,
}

/// `GET /api/chats?channelId=` — list the channel's chats. An unknown
/// channel id yields an empty list.
pub async fn list_chats(
    State(state): State<AppState>,
    Query(query): Query<ListChatsQuery>,
) -> Result<Json<ListChatsResponse>, ApiError> {
    let Some(channel_id) = query.channel_id.filter(|id| !id.is_empty()) else {
        return Err(bad_request("Channel ID is required"));
    };

    let store = state.store.read().await;
    let chats = store
        .channel(&channel_id)
        .map(|channel| {
            channel
                .chats
                .iter()
                .map(|chat| ChatSummary {
                    id: chat.id.clone(),
                    name: chat.name.clone(),
                    last_activity: chat.last_activity_ms,
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(Json(ListChatsResponse { chats, success: true }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChatBody {
    pub channel_id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateChatResponse {
    pub id: String,
    pub name: String,
    pub success: bool,
}

/// `POST /api/chats` — create a provider thread and register a chat for it
/// on the named channel.
pub async fn create_chat(
    State(state): State<AppState>,
    Json(body): Json<CreateChatBody>,
) -> Result<Json<CreateChatResponse>, ApiError> {
    let Some(channel_id) = body.channel_id.filter(|id| !id.is_empty()) else {
        return Err(bad_request("Channel ID is required"));
    };

    let mut store = state.store.write().await;
    let chat = store
        .create_chat_in(&channel_id, body.name.as_deref())
        .await
        .map_err(|e| match e {
            StoreError::UnknownChannel(_) => not_found(&e.to_string()),
            StoreError::Gateway(ref g) => gateway_error(g),
        })?;

    Ok(Json(CreateChatResponse { id: chat.id.clone(), name: chat.name.clone(), success: true }))
}

#[cfg(test)]
#[path = "chats_test.rs"]
mod tests;
