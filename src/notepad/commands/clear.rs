use crate::commands::{CmdMessage, CmdResult, NotepadKey};
use crate::error::{NotepadError, Result};
use crate::model::{Notepad, SnapshotOperation};
use crate::recycle::{self, CaptureScope};
use crate::store::DataStore;
use std::fmt;
use std::str::FromStr;

use super::helpers::all_notepads;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearScope {
    Game,
    All,
}

impl FromStr for ClearScope {
    type Err = NotepadError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "game" => Ok(ClearScope::Game),
            "all" => Ok(ClearScope::All),
            other => Err(NotepadError::Validation(format!(
                "Invalid scope '{}'. Must be 'game' or 'all'",
                other
            ))),
        }
    }
}

impl fmt::Display for ClearScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClearScope::Game => write!(f, "game"),
            ClearScope::All => write!(f, "all"),
        }
    }
}

/// Remove every notepad of one game, or of all games, keeping them all in the
/// recycle bin as a single undoable snapshot.
pub fn run<S: DataStore>(store: &mut S, scope: ClearScope, game: &str) -> Result<CmdResult> {
    let (notepads, operation, capture_scope): (Vec<Notepad>, _, _) = match scope {
        ClearScope::Game => {
            let notepads = store.list_notepads(game)?;
            if notepads.is_empty() {
                return Err(NotepadError::GameEmpty(game.to_string()));
            }
            (
                notepads,
                SnapshotOperation::GameClear,
                CaptureScope {
                    game: Some(game.to_string()),
                    title: None,
                },
            )
        }
        ClearScope::All => {
            let notepads: Vec<Notepad> = all_notepads(store)?
                .into_iter()
                .flat_map(|(_, pads)| pads)
                .collect();
            if notepads.is_empty() {
                return Err(NotepadError::StoreEmpty);
            }
            (notepads, SnapshotOperation::AllClear, CaptureScope::default())
        }
    };

    let keys: Vec<NotepadKey> = notepads
        .iter()
        .map(|n| NotepadKey {
            game: n.game.clone(),
            title: n.title.clone(),
        })
        .collect();
    let high_water: Vec<u64> = notepads.iter().map(|n| n.max_entry_id()).collect();

    recycle::capture(store, operation, capture_scope, notepads)?;
    for (key, id) in keys.iter().zip(high_water) {
        store.record_entry_id_floor(&key.game, &key.title, id)?;
        store.delete_notepad(&key.game, &key.title)?;
    }

    log::info!("Cleared {} notepads (scope: {})", keys.len(), scope);

    let text = match scope {
        ClearScope::Game => format!(
            "Cleared {} notepads from game '{}'. Use undo_clear to restore them.",
            keys.len(),
            game
        ),
        ClearScope::All => format!(
            "Cleared {} notepads from all games. Use undo_clear to restore them.",
            keys.len()
        ),
    };
    let mut result = CmdResult::default();
    if scope == ClearScope::Game {
        result = result.with_game(game);
    }
    result.add_message(CmdMessage::success(text));
    Ok(result.with_affected(keys))
}
