//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the assistant gateway and the conversation store. Handlers are
//! otherwise stateless; the provider owns all durable thread state.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::assistant::AssistantGateway;
use crate::services::conversation::ConversationStore;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum — all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<AssistantGateway>,
    /// In-process chat catalog. Ephemeral: lives for the process lifetime.
    pub store: Arc<RwLock<ConversationStore>>,
}

impl AppState {
    #[must_use]
    pub fn new(gateway: Arc<AssistantGateway>, store: ConversationStore) -> Self {
        Self { gateway, store: Arc::new(RwLock::new(store)) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
