//! Plain text export of one notepad, one game, or every game.
//!
//! Rendering is pure ([`render`]) and returns the artifact text with a
//! suggested file name. [`run`] writes it into the export directory without
//! ever replacing an existing file.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NotepadError, Result};
use crate::model::Notepad;
use crate::sanitize::sanitize_segment;
use crate::store::fs::write_atomic;
use crate::store::DataStore;
use chrono::{DateTime, Local, Utc};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::helpers::all_notepads;

const MAX_NAME_ATTEMPTS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope {
    Notepad,
    Game,
    All,
}

impl FromStr for ExportScope {
    type Err = NotepadError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "notepad" => Ok(ExportScope::Notepad),
            "game" => Ok(ExportScope::Game),
            "all" => Ok(ExportScope::All),
            other => Err(NotepadError::Validation(format!(
                "Invalid scope '{}'. Must be 'notepad', 'game', or 'all'",
                other
            ))),
        }
    }
}

impl fmt::Display for ExportScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportScope::Notepad => write!(f, "notepad"),
            ExportScope::Game => write!(f, "game"),
            ExportScope::All => write!(f, "all"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub contents: String,
}

pub fn run<S: DataStore>(
    store: &S,
    scope: ExportScope,
    game: &str,
    title: Option<&str>,
    export_dir: &Path,
) -> Result<CmdResult> {
    let artifact = render(store, scope, game, title, Utc::now())?;
    let path = write_unique(export_dir, &artifact)?;

    log::info!("Exported {} scope to {}", scope, path.display());

    let mut result = CmdResult::default();
    if scope != ExportScope::All {
        result = result.with_game(game);
    }
    result.add_message(CmdMessage::success(format!(
        "Exported to {}",
        path.display()
    )));
    Ok(result.with_export_path(path))
}

pub fn render<S: DataStore>(
    store: &S,
    scope: ExportScope,
    game: &str,
    title: Option<&str>,
    now: DateTime<Utc>,
) -> Result<ExportArtifact> {
    let stamp = now.with_timezone(&Local).format("%Y%m%d_%H%M%S");

    match scope {
        ExportScope::Notepad => {
            let title = title.map(str::trim).filter(|t| !t.is_empty()).ok_or_else(|| {
                NotepadError::missing_param("title", "notepad name, required for notepad scope")
            })?;
            let notepad = store.get_notepad(game, title)?;
            Ok(ExportArtifact {
                file_name: format!(
                    "Export_{}_{}_{}.txt",
                    sanitize_segment(&notepad.game),
                    sanitize_segment(&notepad.title),
                    stamp
                ),
                contents: render_notepad(&notepad, now),
            })
        }
        ExportScope::Game => {
            let notepads = store.list_notepads(game)?;
            Ok(ExportArtifact {
                file_name: format!(
                    "Export_{}_All_Notepads_{}.txt",
                    sanitize_segment(game),
                    stamp
                ),
                contents: render_game(game, &notepads, now),
            })
        }
        ExportScope::All => {
            let games = all_notepads(store)?;
            Ok(ExportArtifact {
                file_name: format!("Export_All_Games_{}.txt", stamp),
                contents: render_all(&games, now),
            })
        }
    }
}

fn display_time(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

fn indent_block(text: &str, pad: &str) -> String {
    text.lines()
        .map(|line| format!("{}{}", pad, line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn total_entries(notepads: &[Notepad]) -> usize {
    notepads.iter().map(|n| n.entries.len()).sum()
}

/// Notepad header plus entries, at `depth` levels of two-space indentation.
fn notepad_block(lines: &mut Vec<String>, number: usize, notepad: &Notepad, depth: usize) {
    let pad = "  ".repeat(depth);
    let inner = "  ".repeat(depth + 1);

    lines.push(format!("{}NOTEPAD {}: {}", pad, number, notepad.title));
    lines.push(format!("{}{}", pad, "-".repeat(50)));
    lines.push(format!("{}Created: {}", pad, display_time(notepad.created_at)));
    lines.push(format!("{}Last Updated: {}", pad, display_time(notepad.updated_at)));
    lines.push(format!("{}Entries: {}", pad, notepad.entries.len()));
    lines.push(String::new());

    if notepad.entries.is_empty() {
        lines.push(format!("{}No entries in this notepad.", inner));
        lines.push(String::new());
        return;
    }
    for entry in &notepad.entries {
        lines.push(format!("{}Entry #{}", inner, entry.id));
        lines.push(format!("{}{}", inner, "-".repeat(16)));
        lines.push(format!("{}Created: {}", inner, display_time(entry.created_at)));
        lines.push(format!("{}Content:", inner));
        lines.push(indent_block(&entry.content, &inner));
        lines.push(String::new());
    }
}

pub fn render_notepad(notepad: &Notepad, now: DateTime<Utc>) -> String {
    let rule = "=".repeat(60);
    let mut lines = vec![
        rule.clone(),
        "NOTEPAD EXPORT".to_string(),
        rule.clone(),
        String::new(),
        format!("Notepad: {}", notepad.title),
        format!("Game: {}", notepad.game),
        format!("Created: {}", display_time(notepad.created_at)),
        format!("Last Updated: {}", display_time(notepad.updated_at)),
        format!("Total Entries: {}", notepad.entries.len()),
        format!("Exported: {}", display_time(now)),
        String::new(),
        rule,
        String::new(),
    ];

    if notepad.entries.is_empty() {
        lines.push("No entries found in this notepad.".to_string());
    }
    for entry in &notepad.entries {
        lines.push(format!("Entry #{}", entry.id));
        lines.push("-".repeat(20));
        lines.push(format!("Created: {}", display_time(entry.created_at)));
        lines.push("Content:".to_string());
        lines.push(entry.content.clone());
        lines.push(String::new());
        lines.push("-".repeat(40));
        lines.push(String::new());
    }

    lines.join("\n") + "\n"
}

pub fn render_game(game: &str, notepads: &[Notepad], now: DateTime<Utc>) -> String {
    let rule = "=".repeat(80);
    let mut lines = vec![
        rule.clone(),
        format!("GAME EXPORT - {}", game.to_uppercase()),
        rule.clone(),
        String::new(),
        format!("Game: {}", game),
        format!("Total Notepads: {}", notepads.len()),
        format!("Total Entries: {}", total_entries(notepads)),
        format!("Exported: {}", display_time(now)),
        String::new(),
        rule.clone(),
        String::new(),
    ];

    if notepads.is_empty() {
        lines.push(format!("No notepads found for game '{}'.", game));
    }
    for (i, notepad) in notepads.iter().enumerate() {
        if i > 0 {
            lines.push(rule.clone());
            lines.push(String::new());
        }
        notepad_block(&mut lines, i + 1, notepad, 0);
    }

    lines.join("\n") + "\n"
}

pub fn render_all(games: &[(String, Vec<Notepad>)], now: DateTime<Utc>) -> String {
    let rule = "=".repeat(100);
    let notepad_count: usize = games.iter().map(|(_, pads)| pads.len()).sum();
    let entry_count: usize = games.iter().map(|(_, pads)| total_entries(pads)).sum();

    let mut lines = vec![
        rule.clone(),
        "MASTER EXPORT - ALL GAMES".to_string(),
        rule.clone(),
        String::new(),
        format!("Total Games: {}", games.len()),
        format!("Total Notepads: {}", notepad_count),
        format!("Total Entries: {}", entry_count),
        format!("Exported: {}", display_time(now)),
        String::new(),
        rule.clone(),
        String::new(),
    ];

    if games.is_empty() {
        lines.push("No notepads found in any game.".to_string());
    }
    for (i, (key, notepads)) in games.iter().enumerate() {
        if i > 0 {
            lines.push(rule.clone());
            lines.push(String::new());
        }
        // The directory key is sanitized; prefer the name as the user typed it.
        let name = notepads.first().map(|n| n.game.as_str()).unwrap_or(key.as_str());
        lines.push(format!("GAME {}: {}", i + 1, name));
        lines.push("=".repeat(80));
        lines.push(format!("Notepads: {}", notepads.len()));
        lines.push(format!("Total Entries: {}", total_entries(notepads)));
        lines.push(String::new());
        for (j, notepad) in notepads.iter().enumerate() {
            notepad_block(&mut lines, j + 1, notepad, 1);
        }
    }

    lines.join("\n") + "\n"
}

/// Write the artifact under its suggested name, or `<stem>_2.txt`, `_3`, ...
/// when that name is taken.
pub fn write_unique(dir: &Path, artifact: &ExportArtifact) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(NotepadError::Io)?;
    }

    let (stem, ext) = match artifact.file_name.rsplit_once('.') {
        Some((stem, ext)) => (stem.to_string(), format!(".{}", ext)),
        None => (artifact.file_name.clone(), String::new()),
    };

    for attempt in 1..=MAX_NAME_ATTEMPTS {
        let candidate = if attempt == 1 {
            dir.join(&artifact.file_name)
        } else {
            dir.join(format!("{}_{}{}", stem, attempt, ext))
        };
        if candidate.exists() {
            continue;
        }
        write_atomic(&candidate, artifact.contents.as_bytes())?;
        return Ok(candidate);
    }

    Err(NotepadError::Store(format!(
        "Could not find a free export file name for {}",
        artifact.file_name
    )))
}
