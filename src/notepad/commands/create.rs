use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NotepadError, Result};
use crate::model::Notepad;
use crate::store::DataStore;
use chrono::Utc;

use super::helpers::{preview, require};

/// Append `content` to the notepad at `(game, title)`, creating it first when
/// it does not exist yet.
pub fn run<S: DataStore>(store: &mut S, game: &str, title: &str, content: &str) -> Result<CmdResult> {
    let title = require(title, "title", "notepad name")?;
    require(content, "content", "entry to add")?;

    let now = Utc::now();
    let mut notepad = match store.get_notepad(game, title) {
        Ok(notepad) => notepad,
        Err(NotepadError::NotepadNotFound { .. }) => Notepad::new(game, title, now),
        Err(e) => return Err(e),
    };

    let floor = store.entry_id_floor(game, title)?;
    let entry = notepad.append(content, now, floor);
    store.save_notepad(&notepad)?;

    log::info!(
        "Added entry #{} to notepad '{}' for game '{}'",
        entry.id,
        title,
        game
    );

    let mut result = CmdResult::default().with_game(game);
    result.add_message(CmdMessage::success(format!(
        "Added entry #{} to notepad '{}' for game '{}': {}",
        entry.id,
        title,
        game,
        preview(content, 50)
    )));
    Ok(result.with_entry(entry).with_notepad(notepad))
}
