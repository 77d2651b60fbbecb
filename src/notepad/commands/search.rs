//! Case-insensitive substring search over notepad titles and entry content.
//!
//! A title match is reported once per notepad, without an entry id. A content
//! match is reported once per matching entry. Hits come out grouped by game,
//! then notepad (list order), with a notepad's title hit ahead of its entry
//! hits.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Notepad;
use crate::store::DataStore;
use serde::Serialize;

use super::helpers::{all_notepads, preview};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchScope {
    Notepad { game: String, title: String },
    Game(String),
    AllGames,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub game: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<u64>,
    pub snippet: String,
}

pub fn run<S: DataStore>(
    store: &S,
    scope: &SearchScope,
    query: &str,
    snippet_length: usize,
) -> Result<CmdResult> {
    let query = query.trim();
    let mut result = CmdResult::default();
    if let SearchScope::Notepad { game, .. } | SearchScope::Game(game) = scope {
        result = result.with_game(game.as_str());
    }

    if query.is_empty() {
        result.add_message(CmdMessage::warning("Empty query matches nothing"));
        return Ok(result);
    }

    let notepads: Vec<Notepad> = match scope {
        SearchScope::Notepad { game, title } => vec![store.get_notepad(game, title)?],
        SearchScope::Game(game) => store.list_notepads(game)?,
        SearchScope::AllGames => all_notepads(store)?
            .into_iter()
            .flat_map(|(_, pads)| pads)
            .collect(),
    };

    let needle = query.to_lowercase();
    let hits: Vec<SearchHit> = notepads
        .iter()
        .flat_map(|notepad| match_notepad(notepad, &needle, snippet_length))
        .collect();

    log::debug!("Search for '{}' found {} hits", query, hits.len());

    let where_ = match scope {
        SearchScope::Notepad { title, .. } => format!("notepad '{}'", title),
        SearchScope::Game(game) => format!("game '{}'", game),
        SearchScope::AllGames => "all games".to_string(),
    };
    let text = if hits.is_empty() {
        format!("No entries found matching '{}' in {}", query, where_)
    } else {
        let mut lines = vec![format!(
            "Found {} matches for '{}' in {}:",
            hits.len(),
            query,
            where_
        )];
        lines.extend(hits.iter().map(|hit| match hit.entry_id {
            Some(id) => format!("- {} #{}: {}", hit.title, id, hit.snippet),
            None => format!("- {} (title)", hit.title),
        }));
        lines.join("\n")
    };
    result.add_message(CmdMessage::info(text));
    Ok(result.with_hits(hits))
}

fn match_notepad(notepad: &Notepad, needle: &str, snippet_length: usize) -> Vec<SearchHit> {
    let mut hits = Vec::new();
    if notepad.title.to_lowercase().contains(needle) {
        hits.push(SearchHit {
            game: notepad.game.clone(),
            title: notepad.title.clone(),
            entry_id: None,
            snippet: notepad.title.clone(),
        });
    }

    let mut entries: Vec<_> = notepad.entries.iter().collect();
    entries.sort_by_key(|e| e.id);
    for entry in entries {
        if entry.content.to_lowercase().contains(needle) {
            hits.push(SearchHit {
                game: notepad.game.clone(),
                title: notepad.title.clone(),
                entry_id: Some(entry.id),
                snippet: preview(&entry.content, snippet_length),
            });
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotepadError;
    use crate::store::memory::fixtures::store_with;

    fn game(name: &str) -> SearchScope {
        SearchScope::Game(name.to_string())
    }

    #[test]
    fn finds_content_case_insensitively() {
        let store = store_with(&[(
            "Cyberpunk 2077",
            "Missions",
            &["Kill 100 monsters", "Collect IMPLANTS"],
        )]);
        let result = run(&store, &game("Cyberpunk 2077"), "implants", 100).unwrap();

        assert_eq!(result.hits.len(), 1);
        assert_eq!(result.hits[0].entry_id, Some(2));
        assert_eq!(result.hits[0].title, "Missions");
    }

    #[test]
    fn title_match_reported_once() {
        let store = store_with(&[("General", "Boss Fights", &["boss one", "boss two"])]);
        let result = run(&store, &game("General"), "boss", 100).unwrap();

        let ids: Vec<_> = result.hits.iter().map(|h| h.entry_id).collect();
        assert_eq!(ids, vec![None, Some(1), Some(2)]);
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let store = store_with(&[("General", "Missions", &["a"])]);
        let result = run(&store, &game("General"), "zzz", 100).unwrap();
        assert!(result.hits.is_empty());

        let result = run(&store, &game("Unknown"), "a", 100).unwrap();
        assert!(result.hits.is_empty());
    }

    #[test]
    fn empty_query_matches_nothing() {
        let store = store_with(&[("General", "Missions", &["a"])]);
        let result = run(&store, &SearchScope::AllGames, "   ", 100).unwrap();
        assert!(result.hits.is_empty());
    }

    #[test]
    fn all_games_scope_spans_games() {
        let store = store_with(&[
            ("Zelda", "Quests", &["find the sword"]),
            ("Elden Ring", "Builds", &["sword and board"]),
            ("Elden Ring", "Bosses", &["Margit"]),
        ]);
        let result = run(&store, &SearchScope::AllGames, "SWORD", 100).unwrap();
        let games: Vec<_> = result.hits.iter().map(|h| h.game.as_str()).collect();
        assert_eq!(games, vec!["Elden Ring", "Zelda"]);
    }

    #[test]
    fn notepad_scope_requires_notepad() {
        let store = store_with(&[("General", "Missions", &["sword"]), ("General", "Loot", &["sword"])]);
        let scope = SearchScope::Notepad {
            game: "General".into(),
            title: "Loot".into(),
        };
        let result = run(&store, &scope, "sword", 100).unwrap();
        assert_eq!(result.hits.len(), 1);
        assert_eq!(result.hits[0].title, "Loot");

        let missing = SearchScope::Notepad {
            game: "General".into(),
            title: "Nope".into(),
        };
        assert!(matches!(
            run(&store, &missing, "sword", 100),
            Err(NotepadError::NotepadNotFound { .. })
        ));
    }

    #[test]
    fn snippets_are_truncated() {
        let long = "needle ".repeat(40);
        let store = store_with(&[("General", "Long", &[long.as_str()])]);
        let result = run(&store, &game("General"), "needle", 10).unwrap();
        assert_eq!(result.hits[0].snippet, "needle nee...");
    }
}
