use crate::commands::{CmdMessage, CmdResult, NotepadKey};
use crate::error::Result;
use crate::model::SnapshotOperation;
use crate::recycle::{self, CaptureScope};
use crate::store::DataStore;

use super::helpers::require;

/// Move one notepad into the recycle bin.
pub fn run<S: DataStore>(store: &mut S, game: &str, title: &str) -> Result<CmdResult> {
    let title = require(title, "title", "notepad name")?;
    let notepad = store.get_notepad(game, title)?;
    let high_water = notepad.max_entry_id();

    recycle::capture(
        store,
        SnapshotOperation::NotepadDelete,
        CaptureScope {
            game: Some(game.to_string()),
            title: Some(title.to_string()),
        },
        vec![notepad],
    )?;
    store.record_entry_id_floor(game, title, high_water)?;
    store.delete_notepad(game, title)?;

    log::info!("Deleted notepad '{}' for game '{}'", title, game);

    let mut result = CmdResult::default().with_game(game);
    result.add_message(CmdMessage::success(format!(
        "Notepad '{}' deleted from game '{}'. Use undo_clear to restore it.",
        title, game
    )));
    Ok(result.with_affected(vec![NotepadKey {
        game: game.to_string(),
        title: title.to_string(),
    }]))
}
