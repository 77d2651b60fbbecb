use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "notepad")]
#[command(about = "Game-scoped notepads for your play sessions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Game the notepads belong to (defaults to the configured game)
    #[arg(short, long, global = true)]
    pub game: Option<String>,

    /// Root directory of the notepad store
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add an entry to a notepad, creating the notepad if needed
    #[command(visible_alias = "create", alias = "n")]
    Add {
        /// Title of the notepad
        title: String,

        /// Entry text
        #[arg(required = true, num_args = 1..)]
        content: Vec<String>,
    },

    /// Show every entry of a notepad
    #[command(alias = "r")]
    Read { title: String },

    /// List the notepads of a game
    #[command(alias = "ls")]
    List,

    /// Delete a notepad (undoable)
    #[command(alias = "rm")]
    Delete { title: String },

    /// Search titles and entries
    Search {
        query: String,

        /// Restrict the search to one notepad
        #[arg(short, long, conflicts_with = "all")]
        title: Option<String>,

        /// Search every game
        #[arg(short, long)]
        all: bool,
    },

    /// Export notepads to a text file
    Export {
        /// What to export
        #[arg(short, long, value_enum, default_value_t = ExportTarget::Game)]
        scope: ExportTarget,

        /// Notepad to export (for --scope notepad)
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Delete every notepad of the game, or of every game (undoable)
    Clear {
        /// Clear every game
        #[arg(short, long)]
        all: bool,
    },

    /// Restore what the last delete or clear removed
    Undo,

    /// Get or set configuration
    Config {
        /// Configuration key (default-game, export-dir, snippet-length)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Read JSON requests from stdin and print one JSON response per line
    Exec,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportTarget {
    Notepad,
    Game,
    All,
}
