//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for every notepad operation, whether the caller is the CLI or
//! the JSON command surface in [`crate::dispatch`].
//!
//! The facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (a missing or blank game becomes the configured
//!   default game)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It holds no business logic and performs no terminal I/O.
//!
//! `NotepadApi<S: DataStore>` is generic over the storage backend:
//! - Production: `NotepadApi<FileStore>`
//! - Testing: `NotepadApi<InMemoryStore>`
//!
//! There is no process-wide state: the store root, export directory and
//! configuration all live in the handle, which is built once and passed
//! around explicitly.

use crate::commands::{self, search::SearchScope};
use crate::config::NotepadConfig;
use crate::error::Result;
use crate::store::DataStore;

pub struct NotepadApi<S: DataStore> {
    store: S,
    paths: commands::NotepadPaths,
    config: NotepadConfig,
}

impl<S: DataStore> NotepadApi<S> {
    pub fn new(store: S, paths: commands::NotepadPaths, config: NotepadConfig) -> Self {
        Self {
            store,
            paths,
            config,
        }
    }

    pub fn create_note(
        &mut self,
        game: Option<&str>,
        title: &str,
        content: &str,
    ) -> Result<commands::CmdResult> {
        let game = self.config.resolve_game(game);
        commands::create::run(&mut self.store, &game, title, content)
    }

    pub fn read_note(&self, game: Option<&str>, title: &str) -> Result<commands::CmdResult> {
        let game = self.config.resolve_game(game);
        commands::read::run(&self.store, &game, title)
    }

    pub fn list_notes(&self, game: Option<&str>) -> Result<commands::CmdResult> {
        let game = self.config.resolve_game(game);
        commands::list::run(&self.store, &game)
    }

    pub fn delete_note(&mut self, game: Option<&str>, title: &str) -> Result<commands::CmdResult> {
        let game = self.config.resolve_game(game);
        commands::delete::run(&mut self.store, &game, title)
    }

    pub fn notepad_exists(&self, game: Option<&str>, title: &str) -> bool {
        let game = self.config.resolve_game(game);
        self.store.notepad_exists(&game, title.trim())
    }

    /// Search one game, or one notepad when `title` is given, or every game
    /// when `all_games` is set.
    pub fn search_notes(
        &self,
        game: Option<&str>,
        title: Option<&str>,
        query: &str,
        all_games: bool,
    ) -> Result<commands::CmdResult> {
        let game = self.config.resolve_game(game);
        let scope = match title.map(str::trim).filter(|t| !t.is_empty()) {
            _ if all_games => SearchScope::AllGames,
            Some(title) => SearchScope::Notepad {
                game,
                title: title.to_string(),
            },
            None => SearchScope::Game(game),
        };
        commands::search::run(&self.store, &scope, query, self.config.snippet_length)
    }

    pub fn export_notes(
        &self,
        scope: ExportScope,
        game: Option<&str>,
        title: Option<&str>,
    ) -> Result<commands::CmdResult> {
        let game = self.config.resolve_game(game);
        commands::export::run(&self.store, scope, &game, title, &self.paths.export_dir)
    }

    pub fn clear_notes(&mut self, scope: ClearScope, game: Option<&str>) -> Result<commands::CmdResult> {
        let game = self.config.resolve_game(game);
        commands::clear::run(&mut self.store, scope, &game)
    }

    pub fn undo_clear(&mut self) -> Result<commands::CmdResult> {
        commands::undo::run(&mut self.store)
    }
}

pub use crate::commands::clear::ClearScope;
pub use crate::commands::export::ExportScope;
pub use commands::{CmdMessage, CmdResult, MessageLevel, NotepadKey, NotepadPaths, SearchHit};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    fn api() -> NotepadApi<InMemoryStore> {
        NotepadApi::new(
            InMemoryStore::new(),
            NotepadPaths {
                export_dir: std::env::temp_dir(),
            },
            NotepadConfig::default(),
        )
    }

    #[test]
    fn blank_game_uses_default() {
        let mut api = api();
        api.create_note(Some("  "), "Missions", "a").unwrap();
        assert!(api.notepad_exists(Some("General"), "Missions"));
        assert!(api.notepad_exists(None, "Missions"));
    }

    #[test]
    fn search_scope_selection() {
        let mut api = api();
        api.create_note(Some("Zelda"), "Quests", "sword").unwrap();
        api.create_note(Some("Zelda"), "Loot", "sword").unwrap();
        api.create_note(Some("Elden Ring"), "Builds", "sword").unwrap();

        assert_eq!(api.search_notes(Some("Zelda"), None, "sword", false).unwrap().hits.len(), 2);
        assert_eq!(
            api.search_notes(Some("Zelda"), Some("Loot"), "sword", false)
                .unwrap()
                .hits
                .len(),
            1
        );
        assert_eq!(api.search_notes(None, None, "sword", true).unwrap().hits.len(), 3);
    }

    #[test]
    fn delete_then_undo_through_facade() {
        let mut api = api();
        api.create_note(None, "Missions", "a").unwrap();
        api.delete_note(None, "Missions").unwrap();
        assert!(!api.notepad_exists(None, "Missions"));

        api.undo_clear().unwrap();
        assert!(api.notepad_exists(None, "Missions"));
    }
}
