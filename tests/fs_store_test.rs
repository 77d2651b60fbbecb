use notepad::api::{ClearScope, ExportScope, NotepadApi, NotepadPaths};
use notepad::config::NotepadConfig;
use notepad::error::{ErrorKind, NotepadError};
use notepad::store::fs::FileStore;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    root: PathBuf,
    exports: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("notes");
        let exports = dir.path().join("exports");
        Self {
            _dir: dir,
            root,
            exports,
        }
    }

    /// A fresh handle over the same directory, as a new process would see it.
    fn api(&self) -> NotepadApi<FileStore> {
        NotepadApi::new(
            FileStore::new(self.root.clone()),
            NotepadPaths {
                export_dir: self.exports.clone(),
            },
            NotepadConfig::default(),
        )
    }
}

fn files_under(dir: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                found.extend(files_under(&path));
            } else {
                found.push(path);
            }
        }
    }
    found
}

#[test]
fn notepad_persists_across_handles() {
    let fx = Fixture::new();
    fx.api()
        .create_note(Some("Cyberpunk 2077"), "Missions", "Kill 100 monsters")
        .unwrap();
    fx.api()
        .create_note(Some("Cyberpunk 2077"), "Missions", "Collect implants")
        .unwrap();

    assert!(fx.root.join("Cyberpunk 2077").join("Missions.json").is_file());

    let notepad = fx
        .api()
        .read_note(Some("Cyberpunk 2077"), "Missions")
        .unwrap()
        .notepad
        .unwrap();
    let ids: Vec<_> = notepad.entries.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn delete_then_undo_restores_file_byte_for_byte() {
    let fx = Fixture::new();
    fx.api().create_note(Some("Zelda"), "Shrines", "a").unwrap();
    fx.api().create_note(Some("Zelda"), "Shrines", "b").unwrap();
    let path = fx.root.join("Zelda").join("Shrines.json");
    let before = fs::read(&path).unwrap();

    fx.api().delete_note(Some("Zelda"), "Shrines").unwrap();
    assert!(!path.exists());
    assert!(fx.root.join(".recycle_bin").join("last_operation.json").is_file());

    fx.api().undo_clear().unwrap();
    assert_eq!(fs::read(&path).unwrap(), before);

    let err = fx.api().undo_clear().unwrap_err();
    assert!(matches!(err, NotepadError::NothingToUndo));
}

#[test]
fn clear_all_and_undo_across_games() {
    let fx = Fixture::new();
    fx.api().create_note(Some("Zelda"), "Shrines", "a").unwrap();
    fx.api().create_note(Some("Elden Ring"), "Bosses", "b").unwrap();

    let cleared = fx.api().clear_notes(ClearScope::All, None).unwrap();
    assert_eq!(cleared.affected.len(), 2);
    assert!(fx.api().list_notes(Some("Zelda")).unwrap().summaries.is_empty());

    let restored = fx.api().undo_clear().unwrap();
    assert_eq!(restored.affected.len(), 2);
    assert_eq!(fx.api().list_notes(Some("Elden Ring")).unwrap().summaries.len(), 1);
}

#[test]
fn entry_ids_not_reused_after_recreate() {
    let fx = Fixture::new();
    fx.api().create_note(None, "Missions", "a").unwrap();
    fx.api().create_note(None, "Missions", "b").unwrap();
    fx.api().delete_note(None, "Missions").unwrap();

    let created = fx.api().create_note(None, "Missions", "c").unwrap();
    assert_eq!(created.entry.unwrap().id, 3);
}

#[test]
fn entry_ids_not_reused_after_undo_over_recreated_notepad() {
    let fx = Fixture::new();
    fx.api().create_note(None, "Missions", "a").unwrap();
    fx.api().create_note(None, "Missions", "b").unwrap();
    fx.api().delete_note(None, "Missions").unwrap();

    let recreated = fx.api().create_note(None, "Missions", "c").unwrap();
    assert_eq!(recreated.entry.unwrap().id, 3);

    fx.api().undo_clear().unwrap();
    let appended = fx.api().create_note(None, "Missions", "d").unwrap();
    assert_eq!(appended.entry.unwrap().id, 4);
}

#[test]
fn corrupt_notepad_is_skipped_when_listing_but_fails_on_read() {
    let fx = Fixture::new();
    fx.api().create_note(Some("Zelda"), "Good", "sword").unwrap();
    fs::write(fx.root.join("Zelda").join("Broken.json"), "{ not json").unwrap();

    let listed = fx.api().list_notes(Some("Zelda")).unwrap();
    let titles: Vec<_> = listed.summaries.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Good"]);

    let hits = fx.api().search_notes(Some("Zelda"), None, "sword", false).unwrap().hits;
    assert_eq!(hits.len(), 1);

    let exported = fx.api().export_notes(ExportScope::Game, Some("Zelda"), None).unwrap();
    let text = fs::read_to_string(exported.export_path.unwrap()).unwrap();
    assert!(text.contains("Good"));
    assert!(!text.contains("Broken"));

    let err = fx.api().read_note(Some("Zelda"), "Broken").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Storage);
}

#[test]
fn writes_leave_no_temp_files() {
    let fx = Fixture::new();
    for i in 0..5 {
        fx.api()
            .create_note(Some("Zelda"), "Quests", &format!("quest {}", i))
            .unwrap();
    }
    fx.api().delete_note(Some("Zelda"), "Quests").unwrap();
    fx.api().undo_clear().unwrap();

    let leftovers: Vec<_> = files_under(&fx.root)
        .into_iter()
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("tmp"))
        .collect();
    assert!(leftovers.is_empty(), "left behind: {:?}", leftovers);
}

#[test]
fn unsafe_titles_map_to_safe_file_names() {
    let fx = Fixture::new();
    fx.api()
        .create_note(Some("Game: Reloaded"), "What/Where?", "x")
        .unwrap();

    assert!(fx.root.join("Game_ Reloaded").join("What_Where_.json").is_file());
    let listed = fx.api().list_notes(Some("Game: Reloaded")).unwrap();
    assert_eq!(listed.summaries[0].title, "What/Where?");
}

#[test]
fn repeated_exports_never_overwrite() {
    let fx = Fixture::new();
    fx.api().create_note(Some("Zelda"), "Quests", "x").unwrap();

    let first = fx
        .api()
        .export_notes(ExportScope::Notepad, Some("Zelda"), Some("Quests"))
        .unwrap()
        .export_path
        .unwrap();
    let second = fx
        .api()
        .export_notes(ExportScope::Notepad, Some("Zelda"), Some("Quests"))
        .unwrap()
        .export_path
        .unwrap();

    assert_ne!(first, second);
    assert!(first.is_file());
    assert!(second.is_file());
    let name = first.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("Export_Zelda_Quests_"));
}

#[test]
fn clear_is_complete_when_a_record_sits_under_a_foreign_name() {
    let fx = Fixture::new();
    fx.api().create_note(Some("Zelda"), "Alpha", "a").unwrap();
    fx.api().create_note(Some("Zelda"), "Zeta", "z").unwrap();
    // Older plugin versions kept runs of spaces in file names.
    fs::write(
        fx.root.join("Zelda").join("Side  Quests.json"),
        r#"{"title": "Side  Quests", "game": "Zelda",
            "created_at": "2024-01-01T10:00:00", "updated_at": "2024-01-01T10:00:00",
            "entries": [{"id": 1, "content": "fetch", "created_at": "2024-01-01T10:00:00"}]}"#,
    )
    .unwrap();

    let listed = fx.api().list_notes(Some("Zelda")).unwrap();
    let titles: Vec<_> = listed.summaries.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Alpha", "Zeta"]);

    let cleared = fx.api().clear_notes(ClearScope::Game, Some("Zelda")).unwrap();
    assert_eq!(cleared.affected.len(), 2);
    assert!(fx.api().list_notes(Some("Zelda")).unwrap().summaries.is_empty());

    fx.api().undo_clear().unwrap();
    assert_eq!(fx.api().list_notes(Some("Zelda")).unwrap().summaries.len(), 2);
}

