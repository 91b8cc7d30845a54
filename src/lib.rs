//! chatdeck — channel-based chat against hosted AI assistants.
//!
//! ARCHITECTURE
//! ============
//! Three layers, in dependency order:
//!
//! 1. `services::conversation` — the conversation store: channels, chats,
//!    messages and view toggles, with atomic transitions.
//! 2. `assistant` — the gateway to the hosted thread API: create thread,
//!    send-and-await reply (bounded fixed poll), fetch history.
//! 3. `routes` — the JSON API the browser UI consumes.
//!
//! The provider owns all durable conversation state; the store is
//! in-process and ephemeral.

pub mod assistant;
pub mod routes;
pub mod services;
pub mod state;
