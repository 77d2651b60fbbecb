use crate::model::{Entry, Notepad, NotepadSummary};
use serde::Serialize;
use std::path::PathBuf;

pub mod clear;
pub mod create;
pub mod delete;
pub mod export;
pub mod helpers;
pub mod list;
pub mod read;
pub mod search;
pub mod undo;

pub use search::SearchHit;

#[derive(Debug, Clone)]
pub struct NotepadPaths {
    /// Directory export artifacts are written to
    pub export_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// A restored or removed notepad key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotepadKey {
    pub game: String,
    pub title: String,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub game: Option<String>,
    pub entry: Option<Entry>,
    pub notepad: Option<Notepad>,
    pub summaries: Vec<NotepadSummary>,
    pub hits: Vec<SearchHit>,
    pub affected: Vec<NotepadKey>,
    pub export_path: Option<PathBuf>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_game(mut self, game: impl Into<String>) -> Self {
        self.game = Some(game.into());
        self
    }

    pub fn with_entry(mut self, entry: Entry) -> Self {
        self.entry = Some(entry);
        self
    }

    pub fn with_notepad(mut self, notepad: Notepad) -> Self {
        self.notepad = Some(notepad);
        self
    }

    pub fn with_summaries(mut self, summaries: Vec<NotepadSummary>) -> Self {
        self.summaries = summaries;
        self
    }

    pub fn with_hits(mut self, hits: Vec<SearchHit>) -> Self {
        self.hits = hits;
        self
    }

    pub fn with_affected(mut self, affected: Vec<NotepadKey>) -> Self {
        self.affected = affected;
        self
    }

    pub fn with_export_path(mut self, path: PathBuf) -> Self {
        self.export_path = Some(path);
        self
    }

    /// All message lines joined, as handed to the host assistant.
    pub fn message_text(&self) -> String {
        self.messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
