use super::{sort_notepads, DataStore};
use crate::error::{NotepadError, Result};
use crate::model::{Notepad, Snapshot};
use crate::sanitize::sanitize_segment;
use std::collections::{BTreeMap, HashMap};

/// In-memory storage for testing and development.
/// Does NOT persist data.
///
/// Keys go through the same sanitizer as [`super::fs::FileStore`] so both
/// backends agree on which titles collide.
#[derive(Default)]
pub struct InMemoryStore {
    games: BTreeMap<String, HashMap<String, Notepad>>,
    tombstones: HashMap<(String, String), u64>,
    snapshot: Option<Snapshot>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn key(game: &str, title: &str) -> (String, String) {
    (sanitize_segment(game), sanitize_segment(title))
}

impl DataStore for InMemoryStore {
    fn save_notepad(&mut self, notepad: &Notepad) -> Result<()> {
        let (game, title) = key(&notepad.game, &notepad.title);
        self.games
            .entry(game)
            .or_default()
            .insert(title, notepad.clone());
        Ok(())
    }

    fn get_notepad(&self, game: &str, title: &str) -> Result<Notepad> {
        let (game_key, title_key) = key(game, title);
        self.games
            .get(&game_key)
            .and_then(|pads| pads.get(&title_key))
            .cloned()
            .ok_or_else(|| NotepadError::not_found(game, title))
    }

    fn notepad_exists(&self, game: &str, title: &str) -> bool {
        let (game_key, title_key) = key(game, title);
        self.games
            .get(&game_key)
            .is_some_and(|pads| pads.contains_key(&title_key))
    }

    fn list_notepads(&self, game: &str) -> Result<Vec<Notepad>> {
        let mut notepads: Vec<Notepad> = self
            .games
            .get(&sanitize_segment(game))
            .map(|pads| pads.values().cloned().collect())
            .unwrap_or_default();
        sort_notepads(&mut notepads);
        Ok(notepads)
    }

    fn delete_notepad(&mut self, game: &str, title: &str) -> Result<()> {
        let (game_key, title_key) = key(game, title);
        self.games
            .get_mut(&game_key)
            .and_then(|pads| pads.remove(&title_key))
            .map(|_| ())
            .ok_or_else(|| NotepadError::not_found(game, title))
    }

    fn list_games(&self) -> Result<Vec<String>> {
        Ok(self.games.keys().cloned().collect())
    }

    fn entry_id_floor(&self, game: &str, title: &str) -> Result<u64> {
        Ok(self.tombstones.get(&key(game, title)).copied().unwrap_or(0))
    }

    fn record_entry_id_floor(&mut self, game: &str, title: &str, id: u64) -> Result<()> {
        let slot = self.tombstones.entry(key(game, title)).or_insert(0);
        *slot = (*slot).max(id);
        Ok(())
    }

    fn load_snapshot(&self) -> Result<Option<Snapshot>> {
        Ok(self.snapshot.clone())
    }

    fn save_snapshot(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.snapshot = Some(snapshot.clone());
        Ok(())
    }

    fn clear_snapshot(&mut self) -> Result<()> {
        self.snapshot = None;
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use chrono::Utc;

    /// Store pre-populated with notepads built from `(game, title, entries)`.
    pub fn store_with(pads: &[(&str, &str, &[&str])]) -> InMemoryStore {
        let mut store = InMemoryStore::new();
        for (game, title, entries) in pads {
            let now = Utc::now();
            let mut notepad = Notepad::new(*game, *title, now);
            for content in entries.iter() {
                notepad.append(*content, now, 0);
            }
            store
                .save_notepad(&notepad)
                .expect("in-memory save cannot fail");
        }
        store
    }
}
