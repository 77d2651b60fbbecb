//! # Recycle Bin
//!
//! Single-level undo for destructive operations. The bin is either empty or
//! holds exactly one [`Snapshot`]: whatever the most recent delete or clear
//! removed. A new capture discards the previous snapshot outright, so undo
//! only ever reverses the latest destructive operation.
//!
//! ```text
//! Empty ──capture──▶ Holding ──restore──▶ Empty
//!                      │  ▲
//!                      └──┘ capture (overwrite)
//! ```
//!
//! The snapshot is persisted through the [`DataStore`] before anything is
//! removed, so an interrupted delete never loses data.

use crate::error::{NotepadError, Result};
use crate::model::{Notepad, Snapshot, SnapshotOperation};
use crate::store::DataStore;
use chrono::Utc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecycleBin {
    Empty,
    Holding(Snapshot),
}

impl RecycleBin {
    pub fn load<S: DataStore>(store: &S) -> Result<Self> {
        Ok(match store.load_snapshot()? {
            Some(snapshot) => RecycleBin::Holding(snapshot),
            None => RecycleBin::Empty,
        })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RecycleBin::Empty)
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            RecycleBin::Holding(snapshot) => Some(snapshot),
            RecycleBin::Empty => None,
        }
    }
}

/// Where a captured operation applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureScope {
    pub game: Option<String>,
    pub title: Option<String>,
}

/// Replace the bin's contents with `notepads`, verbatim.
pub fn capture<S: DataStore>(
    store: &mut S,
    operation: SnapshotOperation,
    scope: CaptureScope,
    notepads: Vec<Notepad>,
) -> Result<RecycleBin> {
    let snapshot = Snapshot {
        operation,
        game: scope.game,
        title: scope.title,
        captured_at: Utc::now(),
        notepads,
    };
    store.save_snapshot(&snapshot)?;
    log::info!(
        "Captured {} notepad(s) into the recycle bin ({:?})",
        snapshot.notepads.len(),
        snapshot.operation
    );
    Ok(RecycleBin::Holding(snapshot))
}

/// Write every captured notepad back, overwriting anything recreated at the
/// same key, then empty the bin. Returns the restored `(game, title)` pairs.
///
/// If a write fails the snapshot stays in place so the undo can be retried.
pub fn restore<S: DataStore>(store: &mut S) -> Result<Vec<(String, String)>> {
    let snapshot = match RecycleBin::load(store)? {
        RecycleBin::Holding(snapshot) => snapshot,
        RecycleBin::Empty => return Err(NotepadError::NothingToUndo),
    };

    let mut restored = Vec::with_capacity(snapshot.notepads.len());
    for notepad in &snapshot.notepads {
        // A notepad recreated since the capture is about to be overwritten;
        // its ids must stay retired.
        if let Ok(current) = store.get_notepad(&notepad.game, &notepad.title) {
            store.record_entry_id_floor(&notepad.game, &notepad.title, current.max_entry_id())?;
        }
        store.save_notepad(notepad)?;
        restored.push((notepad.game.clone(), notepad.title.clone()));
    }

    store.clear_snapshot()?;
    log::info!(
        "Restored {} notepad(s) from the recycle bin ({:?})",
        restored.len(),
        snapshot.operation
    );
    Ok(restored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::store_with;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn restore_on_empty_bin_fails() {
        let mut store = InMemoryStore::new();
        assert!(RecycleBin::load(&store).unwrap().is_empty());
        assert!(matches!(
            restore(&mut store),
            Err(NotepadError::NothingToUndo)
        ));
    }

    #[test]
    fn capture_then_restore_empties_bin() {
        let mut store = store_with(&[("General", "Missions", &["a", "b"])]);
        let pad = store.get_notepad("General", "Missions").unwrap();
        store.delete_notepad("General", "Missions").unwrap();

        let bin = capture(
            &mut store,
            SnapshotOperation::NotepadDelete,
            CaptureScope {
                game: Some("General".into()),
                title: Some("Missions".into()),
            },
            vec![pad.clone()],
        )
        .unwrap();
        assert_eq!(bin.snapshot().unwrap().notepads.len(), 1);

        let restored = restore(&mut store).unwrap();
        assert_eq!(restored, vec![("General".to_string(), "Missions".to_string())]);
        assert_eq!(store.get_notepad("General", "Missions").unwrap(), pad);
        assert!(RecycleBin::load(&store).unwrap().is_empty());
        assert!(matches!(
            restore(&mut store),
            Err(NotepadError::NothingToUndo)
        ));
    }

    #[test]
    fn second_capture_overwrites_first() {
        let mut store = store_with(&[
            ("General", "First", &["1"]),
            ("General", "Second", &["2"]),
        ]);
        let first = store.get_notepad("General", "First").unwrap();
        let second = store.get_notepad("General", "Second").unwrap();

        capture(
            &mut store,
            SnapshotOperation::NotepadDelete,
            CaptureScope::default(),
            vec![first],
        )
        .unwrap();
        capture(
            &mut store,
            SnapshotOperation::NotepadDelete,
            CaptureScope::default(),
            vec![second],
        )
        .unwrap();

        let bin = RecycleBin::load(&store).unwrap();
        let titles: Vec<_> = bin
            .snapshot()
            .unwrap()
            .notepads
            .iter()
            .map(|n| n.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Second"]);
    }

    #[test]
    fn restore_overwrites_recreated_notepad() {
        let mut store = store_with(&[("General", "Missions", &["old"])]);
        let original = store.get_notepad("General", "Missions").unwrap();
        capture(
            &mut store,
            SnapshotOperation::NotepadDelete,
            CaptureScope::default(),
            vec![original.clone()],
        )
        .unwrap();
        store.delete_notepad("General", "Missions").unwrap();

        let mut recreated = Notepad::new("General", "Missions", Utc::now());
        recreated.append("new", Utc::now(), 0);
        store.save_notepad(&recreated).unwrap();

        restore(&mut store).unwrap();
        assert_eq!(store.get_notepad("General", "Missions").unwrap(), original);
    }

    #[test]
    fn restore_retires_ids_of_recreated_notepad() {
        let mut store = store_with(&[("General", "Missions", &["a", "b"])]);
        let original = store.get_notepad("General", "Missions").unwrap();
        capture(
            &mut store,
            SnapshotOperation::NotepadDelete,
            CaptureScope::default(),
            vec![original],
        )
        .unwrap();
        store.record_entry_id_floor("General", "Missions", 2).unwrap();
        store.delete_notepad("General", "Missions").unwrap();

        let mut recreated = Notepad::new("General", "Missions", Utc::now());
        assert_eq!(recreated.append("c", Utc::now(), 2).id, 3);
        store.save_notepad(&recreated).unwrap();

        restore(&mut store).unwrap();
        assert_eq!(store.entry_id_floor("General", "Missions").unwrap(), 3);
    }
}
