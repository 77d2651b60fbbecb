//! # Storage Layer
//!
//! This module defines the storage abstraction for notepads. The [`DataStore`]
//! trait lets the commands work against different backends.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production file-based storage
//! - [`memory::InMemoryStore`]: in-memory storage for tests, no persistence
//!
//! ## Storage Format
//!
//! For `FileStore`:
//! ```text
//! <notes-root>/
//! ├── <game>/
//! │   ├── <title>.json          # One notepad per file
//! │   └── .tombstones.json      # Entry-id high-water marks of removed notepads
//! ├── .recycle_bin/
//! │   └── last_operation.json   # The single undo snapshot
//! └── config.json
//! ```
//!
//! Game and title segments are produced by [`crate::sanitize`]. Names starting
//! with a dot are store internals and never show up as games or notepads.
//!
//! ## Game keys
//!
//! [`DataStore::list_games`] returns game *keys* (sanitized segments). Because
//! sanitizing is idempotent, a key can be passed back anywhere a game name is
//! accepted.

use crate::error::Result;
use crate::model::{Notepad, Snapshot};

pub mod fs;
pub mod memory;

/// Abstract interface for notepad storage.
///
/// Every mutating method must leave the store in either its previous or its
/// new state, never something in between.
pub trait DataStore {
    /// Create or overwrite the notepad at `(notepad.game, notepad.title)`.
    fn save_notepad(&mut self, notepad: &Notepad) -> Result<()>;

    /// Load a notepad, failing with `NotepadNotFound` when absent.
    fn get_notepad(&self, game: &str, title: &str) -> Result<Notepad>;

    fn notepad_exists(&self, game: &str, title: &str) -> bool;

    /// All readable notepads of a game, sorted by title. Unreadable records are
    /// skipped. A game that does not exist yields an empty list.
    fn list_notepads(&self, game: &str) -> Result<Vec<Notepad>>;

    /// Remove a notepad, failing with `NotepadNotFound` when absent.
    fn delete_notepad(&mut self, game: &str, title: &str) -> Result<()>;

    /// Keys of every game that currently has storage, sorted. A game whose
    /// notepads were all removed may still be listed.
    fn list_games(&self) -> Result<Vec<String>>;

    /// Highest entry id ever handed out by a removed notepad at this key.
    fn entry_id_floor(&self, game: &str, title: &str) -> Result<u64>;

    fn record_entry_id_floor(&mut self, game: &str, title: &str, id: u64) -> Result<()>;

    fn load_snapshot(&self) -> Result<Option<Snapshot>>;

    /// Replace the current snapshot unconditionally.
    fn save_snapshot(&mut self, snapshot: &Snapshot) -> Result<()>;

    fn clear_snapshot(&mut self) -> Result<()>;
}

/// Stable listing order: case-insensitive title, exact title as tie-breaker.
pub fn sort_notepads(notepads: &mut [Notepad]) {
    notepads.sort_by(|a, b| {
        a.title
            .to_lowercase()
            .cmp(&b.title.to_lowercase())
            .then_with(|| a.title.cmp(&b.title))
    });
}
