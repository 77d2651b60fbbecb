use crate::commands::{CmdMessage, CmdResult, NotepadKey};
use crate::error::Result;
use crate::recycle;
use crate::store::DataStore;

/// Reverse the most recent delete or clear.
pub fn run<S: DataStore>(store: &mut S) -> Result<CmdResult> {
    let restored: Vec<NotepadKey> = recycle::restore(store)?
        .into_iter()
        .map(|(game, title)| NotepadKey { game, title })
        .collect();

    let mut lines = vec![format!("Restored {} notepads", restored.len())];
    lines.extend(
        restored
            .iter()
            .map(|k| format!("- {} (game '{}')", k.title, k.game)),
    );

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(lines.join("\n")));
    Ok(result.with_affected(restored))
}
