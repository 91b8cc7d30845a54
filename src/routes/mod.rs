//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the JSON API the browser chat UI consumes: thread creation, the
//! send-and-await message round-trip, thread history, and the per-channel
//! chat catalog. Handlers are thin; the gateway and the conversation store
//! do the work.

pub mod chats;
pub mod history;
pub mod messages;
pub mod threads;

use axum::Router;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::assistant::GatewayError;
use crate::state::AppState;

/// JSON error body: `{ "error": "..." }`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub(crate) type ApiError = (StatusCode, Json<ErrorBody>);

pub(crate) fn bad_request(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorBody { error: message.to_owned() }))
}

pub(crate) fn not_found(message: &str) -> ApiError {
    (StatusCode::NOT_FOUND, Json(ErrorBody { error: message.to_owned() }))
}

/// Gateway failures surface as 500 with the error's display text, which
/// carries the run outcome ("Run timed out", "Run failed", ...).
pub(crate) fn gateway_error(err: &GatewayError) -> ApiError {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody { error: err.to_string() }))
}

/// API routes with a permissive CORS layer.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/threads", post(threads::create_thread))
        .route("/api/messages", post(messages::send_message))
        .route("/api/history", get(history::thread_history))
        .route("/api/chats", get(chats::list_chats).post(chats::create_chat))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
