use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotepadError {
    #[error("{0}")]
    Validation(String),

    #[error("Notepad '{title}' not found for game '{game}'")]
    NotepadNotFound { game: String, title: String },

    #[error("No notepads found for game '{0}'")]
    GameEmpty(String),

    #[error("No notepads found in any game")]
    StoreEmpty,

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

/// Coarse classification reported to callers of the command surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Storage,
}

impl NotepadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NotepadError::Validation(_) => ErrorKind::Validation,
            NotepadError::NotepadNotFound { .. }
            | NotepadError::GameEmpty(_)
            | NotepadError::StoreEmpty
            | NotepadError::NothingToUndo => ErrorKind::NotFound,
            NotepadError::Io(_) | NotepadError::Serialization(_) | NotepadError::Store(_) => {
                ErrorKind::Storage
            }
        }
    }

    pub fn missing_param(name: &str, what: &str) -> Self {
        NotepadError::Validation(format!("Missing required parameter: {} ({})", name, what))
    }

    pub fn not_found(game: &str, title: &str) -> Self {
        NotepadError::NotepadNotFound {
            game: game.to_string(),
            title: title.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NotepadError>;
