//! Domain services: the conversation store and client-local preferences.

pub mod conversation;
pub mod prefs;
