//! Client-local preference store.
//!
//! One file per key under a data directory; the file body is the raw string
//! value. The dark-mode flag is stored under [`DARK_MODE_KEY`] as the
//! literal string `"true"` / `"false"`.

use std::io;
use std::path::{Path, PathBuf};

/// Key under which the dark-mode boolean is persisted.
pub const DARK_MODE_KEY: &str = "darkMode";

/// Durable key/value store for view preferences.
#[derive(Debug, Clone)]
pub struct Prefs {
    dir: PathBuf,
}

impl Prefs {
    /// Open (creating if needed) a preference directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl AsRef<Path>) -> io::Result<Self> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir: dir.as_ref().to_path_buf() })
    }

    /// Read a stored value. Absent or unreadable keys are `None`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.dir.join(key)).ok()
    }

    /// Store a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn set(&self, key: &str, value: &str) -> io::Result<()> {
        std::fs::write(self.dir.join(key), value)
    }

    /// Read a stored boolean: the literal `"true"` or `"false"`. Anything
    /// else (including an absent key) is `None`.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)?.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    /// Store a boolean as the literal `"true"` / `"false"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn set_bool(&self, key: &str, value: bool) -> io::Result<()> {
        self.set(key, if value { "true" } else { "false" })
    }
}

#[cfg(test)]
#[path = "prefs_test.rs"]
mod tests;
