use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

use super::helpers::require;

pub fn run<S: DataStore>(store: &S, game: &str, title: &str) -> Result<CmdResult> {
    let title = require(title, "title", "notepad name")?;
    let mut notepad = store.get_notepad(game, title)?;
    notepad.entries.sort_by_key(|e| e.id);

    log::debug!(
        "Read notepad '{}' with {} entries for game '{}'",
        title,
        notepad.entries.len(),
        game
    );

    let mut text = format!(
        "Notepad '{}' for game '{}' contains {} entries",
        notepad.title,
        game,
        notepad.entries.len()
    );
    if !notepad.entries.is_empty() {
        text.push(':');
        for entry in &notepad.entries {
            text.push_str(&format!("\n#{}: {}", entry.id, entry.content));
        }
    }

    let mut result = CmdResult::default().with_game(game);
    result.add_message(CmdMessage::info(text));
    Ok(result.with_notepad(notepad))
}
