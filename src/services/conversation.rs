//! Conversation store — channels, chats, messages and view toggles.
//!
//! DESIGN
//! ======
//! Owns the channel/chat/message graph the presentation layer renders, plus
//! the view-relevant flags (dark mode, sidebar/list visibility, typing
//! indicator). All transitions are explicit methods on the store; there are
//! no ambient singletons. `current_channel` and `current_chat` are resolved
//! by id against the live collections on every call, so a mutation can
//! never leave a caller holding a stale snapshot.
//!
//! TRADE-OFFS
//! ==========
//! `send_message` commits the user entry before the gateway round-trip and
//! never rolls it back on failure. That asymmetry is intended behavior (the
//! user sees what they typed even when the assistant never answers), not an
//! oversight.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::assistant::{AssistantGateway, GatewayError};
use crate::services::prefs::{DARK_MODE_KEY, Prefs};

// =============================================================================
// DATA MODEL
// =============================================================================

/// One message inside a chat. Append-only from the client's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    /// `true` for user-authored entries, `false` for assistant replies.
    pub from_user: bool,
    /// Unix epoch milliseconds.
    pub timestamp_ms: i64,
}

/// One conversation, optionally tied to a provider thread. A chat without a
/// thread reference cannot send messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: String,
    pub name: String,
    pub messages: Vec<ChatMessage>,
    pub last_activity_ms: i64,
    pub thread_id: Option<String>,
}

/// A preset assistant category holding an ordered list of chats. Exactly one
/// channel is active at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub chats: Vec<Chat>,
    pub is_active: bool,
}

/// Outcome of [`ConversationStore::send_message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Guard hit: blank text, no current chat, or no thread reference.
    Skipped,
    /// User entry committed and the assistant reply appended.
    Delivered,
}

/// Errors surfaced by store operations that reach the gateway.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unknown channel: {0}")]
    UnknownChannel(String),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

// =============================================================================
// CHANNEL CATALOG
// =============================================================================

fn sample_chat(id: &str, name: &str) -> Chat {
    let now = now_ms();
    Chat {
        id: id.to_owned(),
        name: name.to_owned(),
        messages: vec![ChatMessage {
            id: format!("msg-{id}-1"),
            text: format!("Welcome to {name}! How can I assist you today?"),
            from_user: false,
            timestamp_ms: now - 1000 * 60 * 10,
        }],
        last_activity_ms: now,
        thread_id: None,
    }
}

/// Static channel catalog, defined at process start. The first channel is
/// active; the catalog is never empty.
#[must_use]
pub fn default_channels() -> Vec<Channel> {
    vec![
        Channel {
            id: "channel-userguide".into(),
            name: "User Guide Assistant".into(),
            description: "Get help with product documentation and guidance".into(),
            icon: "\u{1f4da}".into(),
            color: "emerald".into(),
            chats: vec![
                sample_chat("chat-userguide-1", "Guide Help"),
                sample_chat("chat-userguide-2", "Product Questions"),
            ],
            is_active: true,
        },
        Channel {
            id: "channel-report".into(),
            name: "Report Builder".into(),
            description: "Generate data reports and visualizations".into(),
            icon: "\u{1f4ca}".into(),
            color: "blue".into(),
            chats: vec![
                sample_chat("chat-report-1", "Monthly Report"),
                sample_chat("chat-report-2", "Sales Analytics"),
            ],
            is_active: false,
        },
        Channel {
            id: "channel-sql".into(),
            name: "SQL Assistant".into(),
            description: "Get help with SQL queries and database issues".into(),
            icon: "\u{1f4be}".into(),
            color: "purple".into(),
            chats: vec![
                sample_chat("chat-sql-1", "Query Optimization"),
                sample_chat("chat-sql-2", "Database Schema"),
            ],
            is_active: false,
        },
    ]
}

// =============================================================================
// STORE
// =============================================================================

pub struct ConversationStore {
    gateway: Arc<AssistantGateway>,
    prefs: Prefs,
    channels: Vec<Channel>,
    current_chat_id: Option<String>,
    is_typing: bool,
    dark_mode: bool,
    mobile_sidebar_open: bool,
    chat_list_open: bool,
    narrow_viewport: bool,
}

impl ConversationStore {
    /// Build a store over the default catalog. Dark mode is restored from
    /// the stored `darkMode` preference; `ambient_dark` (the platform's
    /// light/dark preference, supplied by the presentation layer) applies
    /// only when nothing is stored.
    #[must_use]
    pub fn new(gateway: Arc<AssistantGateway>, prefs: Prefs, ambient_dark: bool) -> Self {
        let channels = default_channels();
        let current_chat_id = channels[0].chats.first().map(|chat| chat.id.clone());
        let dark_mode = prefs.get_bool(DARK_MODE_KEY).unwrap_or(ambient_dark);
        Self {
            gateway,
            prefs,
            channels,
            current_chat_id,
            is_typing: false,
            dark_mode,
            mobile_sidebar_open: false,
            chat_list_open: true,
            narrow_viewport: false,
        }
    }

    // ===== accessors =====

    #[must_use]
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Look up a channel by id.
    #[must_use]
    pub fn channel(&self, channel_id: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.id == channel_id)
    }

    /// The active channel. Falls back to the first cataloged channel, which
    /// always exists.
    #[must_use]
    pub fn current_channel(&self) -> &Channel {
        self.channels
            .iter()
            .find(|c| c.is_active)
            .unwrap_or(&self.channels[0])
    }

    /// The current chat, resolved live within the active channel.
    #[must_use]
    pub fn current_chat(&self) -> Option<&Chat> {
        let id = self.current_chat_id.as_deref()?;
        self.current_channel().chats.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.is_typing
    }

    #[must_use]
    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    #[must_use]
    pub fn mobile_sidebar_open(&self) -> bool {
        self.mobile_sidebar_open
    }

    #[must_use]
    pub fn chat_list_open(&self) -> bool {
        self.chat_list_open
    }

    // ===== selection =====

    /// Activate the given channel, deactivating all others, and reset the
    /// current chat to that channel's first chat (or none). An id that
    /// matches no channel falls back to the first cataloged channel —
    /// compatibility policy, not something callers should lean on. Closes
    /// the mobile sidebar overlay either way.
    pub fn select_channel(&mut self, channel_id: &str) {
        let target_id = match self.channel(channel_id) {
            Some(channel) => channel.id.clone(),
            None => {
                warn!(channel_id, "select_channel: unknown id, falling back to first channel");
                self.channels[0].id.clone()
            }
        };

        for channel in &mut self.channels {
            channel.is_active = channel.id == target_id;
        }
        self.current_chat_id = self
            .current_channel()
            .chats
            .first()
            .map(|chat| chat.id.clone());
        self.mobile_sidebar_open = false;
    }

    /// Set or clear the current chat. A `Some` id is looked up within the
    /// active channel only; chats on other channels are not selectable this
    /// way, and an unknown id is a no-op. On narrow viewports a successful
    /// selection collapses the chat-list panel.
    pub fn select_chat(&mut self, chat_id: Option<&str>) {
        let Some(chat_id) = chat_id else {
            self.current_chat_id = None;
            return;
        };

        if self
            .current_channel()
            .chats
            .iter()
            .any(|chat| chat.id == chat_id)
        {
            self.current_chat_id = Some(chat_id.to_owned());
            if self.narrow_viewport {
                self.chat_list_open = false;
            }
        }
    }

    // ===== chat lifecycle =====

    /// Create a chat on the active channel and make it current.
    ///
    /// # Errors
    ///
    /// Propagates the gateway failure when the provider thread cannot be
    /// created; the store is left unchanged in that case.
    pub async fn create_chat(&mut self) -> Result<&Chat, StoreError> {
        let channel_id = self.current_channel().id.clone();
        self.create_chat_in(&channel_id, None).await
    }

    /// Create a chat on the named channel: requests a provider thread, then
    /// prepends a fresh chat referencing it. The chat becomes current only
    /// when that channel is the active one.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnknownChannel`] before any provider call when the
    /// channel id matches nothing; otherwise the gateway failure, with no
    /// state change.
    pub async fn create_chat_in(&mut self, channel_id: &str, name: Option<&str>) -> Result<&Chat, StoreError> {
        let index = self
            .channels
            .iter()
            .position(|c| c.id == channel_id)
            .ok_or_else(|| StoreError::UnknownChannel(channel_id.to_owned()))?;

        let gateway = Arc::clone(&self.gateway);
        let thread_id = gateway.create_thread().await?;

        let channel = &mut self.channels[index];
        let name = match name {
            Some(n) if !n.trim().is_empty() => n.to_owned(),
            _ => format!("New Chat {}", channel.chats.len() + 1),
        };
        let chat = Chat {
            id: format!("chat-{channel_id}-{}", Uuid::new_v4()),
            name,
            messages: Vec::new(),
            last_activity_ms: now_ms(),
            thread_id: Some(thread_id),
        };
        channel.chats.insert(0, chat);

        if channel.is_active {
            self.current_chat_id = Some(self.channels[index].chats[0].id.clone());
        }
        Ok(&self.channels[index].chats[0])
    }

    /// Remove a chat from the active channel. If it was the current chat,
    /// the new current chat is the updated list's first entry or none. The
    /// provider-side thread is deliberately left alone.
    pub fn delete_chat(&mut self, chat_id: &str) {
        let active_id = self.current_channel().id.clone();
        let Some(channel) = self.channels.iter_mut().find(|c| c.id == active_id) else {
            return;
        };
        channel.chats.retain(|chat| chat.id != chat_id);

        if self.current_chat_id.as_deref() == Some(chat_id) {
            self.current_chat_id = self
                .current_channel()
                .chats
                .first()
                .map(|chat| chat.id.clone());
        }
    }

    // ===== messaging =====

    /// Send `text` on the current chat and await the assistant's reply.
    ///
    /// Guards first: blank text, no current chat, or a chat without a
    /// thread reference all return [`SendOutcome::Skipped`] untouched. The
    /// user entry is appended optimistically before the gateway round-trip
    /// and stays appended on failure.
    ///
    /// # Errors
    ///
    /// Propagates the gateway failure (run failed, run timed out, transport)
    /// after committing the user entry.
    pub async fn send_message(&mut self, text: &str) -> Result<SendOutcome, StoreError> {
        if text.trim().is_empty() {
            return Ok(SendOutcome::Skipped);
        }
        let Some((chat_id, thread_id)) = self
            .current_chat()
            .and_then(|chat| chat.thread_id.clone().map(|t| (chat.id.clone(), t)))
        else {
            return Ok(SendOutcome::Skipped);
        };

        self.push_message(&chat_id, text, true);

        self.is_typing = true;
        let gateway = Arc::clone(&self.gateway);
        let result = gateway.send_and_await_reply(&thread_id, text).await;
        self.is_typing = false;

        match result {
            Ok(reply) => {
                self.push_message(&chat_id, &reply, false);
                Ok(SendOutcome::Delivered)
            }
            Err(e) => {
                warn!(%chat_id, error = %e, "send_message: assistant reply failed, user entry kept");
                Err(e.into())
            }
        }
    }

    fn push_message(&mut self, chat_id: &str, text: &str, from_user: bool) {
        let active_id = self.current_channel().id.clone();
        let Some(chat) = self
            .channels
            .iter_mut()
            .find(|c| c.id == active_id)
            .and_then(|channel| channel.chats.iter_mut().find(|chat| chat.id == chat_id))
        else {
            return;
        };
        let now = now_ms();
        chat.messages.push(ChatMessage {
            id: format!("msg-{}", Uuid::new_v4()),
            text: text.to_owned(),
            from_user,
            timestamp_ms: now,
        });
        chat.last_activity_ms = now;
    }

    // ===== view toggles =====

    /// Flip dark mode and persist the new value. A persistence failure is
    /// logged and the in-memory flip kept.
    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
        if let Err(e) = self.prefs.set_bool(DARK_MODE_KEY, self.dark_mode) {
            warn!(error = %e, "dark mode preference not persisted");
        }
    }

    pub fn toggle_mobile_sidebar(&mut self) {
        self.mobile_sidebar_open = !self.mobile_sidebar_open;
    }

    pub fn toggle_chat_list(&mut self) {
        self.chat_list_open = !self.chat_list_open;
    }

    /// Presentation informs the store of the viewport class; drives the
    /// chat-list collapse side effect of [`ConversationStore::select_chat`].
    pub fn set_narrow_viewport(&mut self, narrow: bool) {
        self.narrow_viewport = narrow;
    }
}

fn now_ms() -> i64 {
    let Ok(duration) = std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(duration.as_millis()).unwrap_or(0)
}

#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;
