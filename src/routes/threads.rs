//! Thread creation route.

use axum::extract::State;
use axum::response::Json;
use serde::Serialize;

use crate::routes::{ApiError, gateway_error};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateThreadResponse {
    pub thread_id: String,
    pub success: bool,
}

/// `POST /api/threads` — create a new provider thread.
pub async fn create_thread(State(state): State<AppState>) -> Result<Json<CreateThreadResponse>, ApiError> {
    let thread_id = state
        .gateway
        .create_thread()
        .await
        .map_err(|e| gateway_error(&e))?;
    Ok(Json(CreateThreadResponse { thread_id, success: true }))
}

#[cfg(test)]
#[path = "threads_test.rs"]
mod tests;
