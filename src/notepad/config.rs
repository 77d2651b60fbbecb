use crate::error::{NotepadError, Result};
use crate::store::fs::write_atomic;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_GAME: &str = "General";
const DEFAULT_SNIPPET_LENGTH: usize = 100;

/// Configuration for the notepad store, kept in `<notes-root>/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotepadConfig {
    /// Game used when a request names none
    #[serde(default = "default_game")]
    pub default_game: String,

    /// Where export artifacts are written (Desktop when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,

    /// Maximum characters of entry content shown in search results
    #[serde(default = "default_snippet_length")]
    pub snippet_length: usize,
}

fn default_game() -> String {
    DEFAULT_GAME.to_string()
}

fn default_snippet_length() -> usize {
    DEFAULT_SNIPPET_LENGTH
}

pub const CONFIG_KEYS: &[&str] = &["default-game", "export-dir", "snippet-length"];

fn unknown_key(key: &str) -> NotepadError {
    NotepadError::Validation(format!(
        "Unknown config key: {}. Known keys: {}",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

impl Default for NotepadConfig {
    fn default() -> Self {
        Self {
            default_game: default_game(),
            export_dir: None,
            snippet_length: DEFAULT_SNIPPET_LENGTH,
        }
    }
}

impl NotepadConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(NotepadError::Io)?;
        let config: NotepadConfig =
            serde_json::from_str(&content).map_err(NotepadError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(NotepadError::Io)?;
        }

        let content = serde_json::to_string_pretty(self).map_err(NotepadError::Serialization)?;
        write_atomic(&config_dir.join(CONFIG_FILENAME), content.as_bytes())
    }

    /// Current value of a setting, by its CLI key.
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "default-game" => Ok(self.default_game.clone()),
            "export-dir" => Ok(self
                .export_dir
                .as_ref()
                .map(|dir| dir.display().to_string())
                .unwrap_or_default()),
            "snippet-length" => Ok(self.snippet_length.to_string()),
            other => Err(unknown_key(other)),
        }
    }

    /// Update a setting from its CLI key and textual value. An empty
    /// `export-dir` unsets it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "default-game" if !value.is_empty() => self.default_game = value.to_string(),
            "default-game" => {
                return Err(NotepadError::Validation("default-game cannot be empty".into()))
            }
            "export-dir" if value.is_empty() => self.export_dir = None,
            "export-dir" => self.export_dir = Some(PathBuf::from(value)),
            "snippet-length" => {
                self.snippet_length = value
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| {
                        NotepadError::Validation(format!(
                            "snippet-length must be a positive number, got '{}'",
                            value
                        ))
                    })?
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }

    /// The game to use for `requested`, falling back to the default when the
    /// request names none.
    pub fn resolve_game(&self, requested: Option<&str>) -> String {
        match requested.map(str::trim) {
            Some(game) if !game.is_empty() => game.to_string(),
            _ => self.default_game.clone(),
        }
    }
}
