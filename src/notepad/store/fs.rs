use super::{sort_notepads, DataStore};
use crate::error::{NotepadError, Result};
use crate::model::{Notepad, Snapshot};
use crate::sanitize::{notepad_file_name, sanitize_segment};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const RECYCLE_BIN_DIR: &str = ".recycle_bin";
pub const SNAPSHOT_FILE: &str = "last_operation.json";
pub const TOMBSTONES_FILE: &str = ".tombstones.json";

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn game_dir(&self, game: &str) -> PathBuf {
        self.root.join(sanitize_segment(game))
    }

    pub fn notepad_path(&self, game: &str, title: &str) -> PathBuf {
        self.game_dir(game).join(notepad_file_name(title))
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.root.join(RECYCLE_BIN_DIR).join(SNAPSHOT_FILE)
    }

    fn tombstones_path(&self, game: &str) -> PathBuf {
        self.game_dir(game).join(TOMBSTONES_FILE)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(NotepadError::Io)?;
        }
        Ok(())
    }

    fn read_notepad_file(&self, path: &Path) -> Result<Notepad> {
        let content = fs::read_to_string(path).map_err(NotepadError::Io)?;
        serde_json::from_str(&content).map_err(NotepadError::Serialization)
    }

    fn load_tombstones(&self, game: &str) -> Result<BTreeMap<String, u64>> {
        let path = self.tombstones_path(game);
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&path).map_err(NotepadError::Io)?;
        match serde_json::from_str(&content) {
            Ok(tombstones) => Ok(tombstones),
            Err(e) => {
                log::warn!("Ignoring unreadable tombstones {}: {}", path.display(), e);
                Ok(BTreeMap::new())
            }
        }
    }
}

/// Write `content` to `target` so that readers see either the old file or the
/// complete new one: data goes to a hidden sibling, is synced, then renamed.
pub fn write_atomic(target: &Path, content: &[u8]) -> Result<()> {
    let dir = target
        .parent()
        .ok_or_else(|| NotepadError::Store(format!("No parent directory for {}", target.display())))?;
    let name = target
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("notepad");
    let tmp_path = dir.join(format!(".{}-{}.tmp", name, Uuid::new_v4()));

    let written = fs::File::create(&tmp_path).and_then(|mut file| {
        file.write_all(content)?;
        file.sync_all()
    });
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(NotepadError::Io(e));
    }

    if let Err(e) = fs::rename(&tmp_path, target) {
        let _ = fs::remove_file(&tmp_path);
        return Err(NotepadError::Io(e));
    }
    Ok(())
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(true)
}

impl DataStore for FileStore {
    fn save_notepad(&mut self, notepad: &Notepad) -> Result<()> {
        let dir = self.game_dir(&notepad.game);
        self.ensure_dir(&dir)?;

        let path = dir.join(notepad_file_name(&notepad.title));
        let content = serde_json::to_string_pretty(notepad).map_err(NotepadError::Serialization)?;
        write_atomic(&path, content.as_bytes())?;
        log::debug!("Saved notepad '{}' to {}", notepad.title, path.display());
        Ok(())
    }

    fn get_notepad(&self, game: &str, title: &str) -> Result<Notepad> {
        let path = self.notepad_path(game, title);
        if !path.is_file() {
            return Err(NotepadError::not_found(game, title));
        }
        self.read_notepad_file(&path)
    }

    fn notepad_exists(&self, game: &str, title: &str) -> bool {
        self.notepad_path(game, title).is_file()
    }

    fn list_notepads(&self, game: &str) -> Result<Vec<Notepad>> {
        let dir = self.game_dir(game);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut notepads = Vec::new();
        for entry in fs::read_dir(&dir).map_err(NotepadError::Io)? {
            let path = entry.map_err(NotepadError::Io)?.path();
            if !path.is_file() || is_hidden(&path) {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match self.read_notepad_file(&path) {
                // Only records reachable again through their own game and
                // title are listed; anything else could not be read, deleted
                // or restored by key.
                Ok(notepad) if self.notepad_path(&notepad.game, &notepad.title) == path => {
                    notepads.push(notepad)
                }
                Ok(notepad) => log::warn!(
                    "Skipping notepad {}: its game '{}' and title '{}' map to {}",
                    path.display(),
                    notepad.game,
                    notepad.title,
                    self.notepad_path(&notepad.game, &notepad.title).display()
                ),
                Err(e) => log::warn!("Skipping unreadable notepad {}: {}", path.display(), e),
            }
        }

        sort_notepads(&mut notepads);
        Ok(notepads)
    }

    fn delete_notepad(&mut self, game: &str, title: &str) -> Result<()> {
        let path = self.notepad_path(game, title);
        if !path.is_file() {
            return Err(NotepadError::not_found(game, title));
        }
        fs::remove_file(&path).map_err(NotepadError::Io)?;
        log::debug!("Removed {}", path.display());
        Ok(())
    }

    fn list_games(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut games = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(NotepadError::Io)? {
            let path = entry.map_err(NotepadError::Io)?.path();
            if !path.is_dir() || is_hidden(&path) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                games.push(name.to_string());
            }
        }
        games.sort();
        Ok(games)
    }

    fn entry_id_floor(&self, game: &str, title: &str) -> Result<u64> {
        let tombstones = self.load_tombstones(game)?;
        Ok(tombstones
            .get(&sanitize_segment(title))
            .copied()
            .unwrap_or(0))
    }

    fn record_entry_id_floor(&mut self, game: &str, title: &str, id: u64) -> Result<()> {
        let mut tombstones = self.load_tombstones(game)?;
        let slot = tombstones.entry(sanitize_segment(title)).or_insert(0);
        if *slot >= id {
            return Ok(());
        }
        *slot = id;

        let dir = self.game_dir(game);
        self.ensure_dir(&dir)?;
        let content =
            serde_json::to_string_pretty(&tombstones).map_err(NotepadError::Serialization)?;
        write_atomic(&self.tombstones_path(game), content.as_bytes())
    }

    fn load_snapshot(&self) -> Result<Option<Snapshot>> {
        let path = self.snapshot_path();
        if !path.is_file() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(NotepadError::Io)?;
        let snapshot = serde_json::from_str(&content).map_err(NotepadError::Serialization)?;
        Ok(Some(snapshot))
    }

    fn save_snapshot(&mut self, snapshot: &Snapshot) -> Result<()> {
        let dir = self.root.join(RECYCLE_BIN_DIR);
        self.ensure_dir(&dir)?;
        let content = serde_json::to_string_pretty(snapshot).map_err(NotepadError::Serialization)?;
        write_atomic(&self.snapshot_path(), content.as_bytes())
    }

    fn clear_snapshot(&mut self) -> Result<()> {
        let path = self.snapshot_path();
        if path.is_file() {
            fs::remove_file(path).map_err(NotepadError::Io)?;
        }
        Ok(())
    }
}
