use crate::error::{NotepadError, Result};
use crate::model::Notepad;
use crate::store::DataStore;

/// Every game that holds at least one notepad, with its notepads in list order.
pub fn all_notepads<S: DataStore>(store: &S) -> Result<Vec<(String, Vec<Notepad>)>> {
    let mut games = Vec::new();
    for key in store.list_games()? {
        let notepads = store.list_notepads(&key)?;
        if !notepads.is_empty() {
            games.push((key, notepads));
        }
    }
    Ok(games)
}

/// First `max` characters of `text`, with `...` appended when cut.
pub fn preview(text: &str, max: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

/// Trimmed value of a required text argument.
pub fn require<'a>(value: &'a str, name: &str, what: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(NotepadError::missing_param(name, what));
    }
    Ok(trimmed)
}
