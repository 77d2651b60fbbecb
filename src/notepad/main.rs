use chrono::Utc;
use clap::Parser;
use colored::*;
use directories::{ProjectDirs, UserDirs};
use notepad::api::{ClearScope, CmdMessage, ExportScope, MessageLevel, NotepadApi, NotepadPaths};
use notepad::config::{NotepadConfig, CONFIG_KEYS};
use notepad::dispatch::{self, Envelope, Request, Response};
use notepad::error::{NotepadError, Result};
use notepad::model::{Notepad, NotepadSummary};
use notepad::store::fs::FileStore;
use std::io::Read;
use std::path::{Path, PathBuf};
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands, ExportTarget};

const HOME_ENV: &str = "NOTEPAD_HOME";
const DOCUMENTS_FOLDER: &str = "Notepad-Notes";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: NotepadApi<FileStore>,
    game: Option<String>,
    root: PathBuf,
    config: NotepadConfig,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Add { title, content }) => handle_add(&mut ctx, &title, &content.join(" ")),
        Some(Commands::Read { title }) => handle_read(&ctx, &title),
        Some(Commands::List) | None => handle_list(&ctx),
        Some(Commands::Delete { title }) => handle_delete(&mut ctx, &title),
        Some(Commands::Search { query, title, all }) => {
            handle_search(&ctx, &query, title.as_deref(), all)
        }
        Some(Commands::Export { scope, title }) => handle_export(&ctx, scope, title.as_deref()),
        Some(Commands::Clear { all }) => handle_clear(&mut ctx, all),
        Some(Commands::Undo) => handle_undo(&mut ctx),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        Some(Commands::Exec) => handle_exec(&mut ctx),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let root = resolve_root(cli)?;
    let config = match NotepadConfig::load(&root) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Ignoring unreadable config in {}: {}", root.display(), e);
            NotepadConfig::default()
        }
    };
    let export_dir = resolve_export_dir(&config, &root);
    log::debug!(
        "Notes root: {}, exports: {}",
        root.display(),
        export_dir.display()
    );

    let store = FileStore::new(root.clone());
    let paths = NotepadPaths { export_dir };
    let api = NotepadApi::new(store, paths, config.clone());

    Ok(AppContext {
        api,
        game: cli.game.clone(),
        root,
        config,
    })
}

/// `--root`, then `$NOTEPAD_HOME`, then `<Documents>/Notepad-Notes`, then the
/// platform data directory.
fn resolve_root(cli: &Cli) -> Result<PathBuf> {
    if let Some(root) = &cli.root {
        return Ok(root.clone());
    }
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    if let Some(docs) = UserDirs::new().and_then(|d| d.document_dir().map(|p| p.join(DOCUMENTS_FOLDER)))
    {
        return Ok(docs);
    }
    ProjectDirs::from("com", "notepad", "notepad")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| NotepadError::Store("Could not determine notes directory".into()))
}

fn resolve_export_dir(config: &NotepadConfig, root: &Path) -> PathBuf {
    if let Some(dir) = &config.export_dir {
        return dir.clone();
    }
    UserDirs::new()
        .and_then(|d| {
            d.desktop_dir()
                .map(|p| p.to_path_buf())
                .or_else(|| Some(d.home_dir().to_path_buf()))
        })
        .unwrap_or_else(|| root.to_path_buf())
}

fn handle_add(ctx: &mut AppContext, title: &str, content: &str) -> Result<()> {
    let result = ctx.api.create_note(ctx.game.as_deref(), title, content)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_read(ctx: &AppContext, title: &str) -> Result<()> {
    let result = ctx.api.read_note(ctx.game.as_deref(), title)?;
    if let Some(notepad) = &result.notepad {
        print_notepad(notepad);
    }
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_notes(ctx.game.as_deref())?;
    match &result.game {
        Some(game) if !result.summaries.is_empty() => {
            println!("{}", game.bold());
            print_summaries(&result.summaries);
        }
        _ => print_messages(&result.messages),
    }
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, title: &str) -> Result<()> {
    let result = ctx.api.delete_note(ctx.game.as_deref(), title)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(ctx: &AppContext, query: &str, title: Option<&str>, all: bool) -> Result<()> {
    let result = ctx.api.search_notes(ctx.game.as_deref(), title, query, all)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &AppContext, target: ExportTarget, title: Option<&str>) -> Result<()> {
    let scope = match target {
        ExportTarget::Notepad => ExportScope::Notepad,
        ExportTarget::Game => ExportScope::Game,
        ExportTarget::All => ExportScope::All,
    };
    let result = ctx.api.export_notes(scope, ctx.game.as_deref(), title)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_clear(ctx: &mut AppContext, all: bool) -> Result<()> {
    let scope = if all { ClearScope::All } else { ClearScope::Game };
    let result = ctx.api.clear_notes(scope, ctx.game.as_deref())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_undo(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.undo_clear()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key.as_deref(), value) {
        (None, _) => {
            for key in CONFIG_KEYS {
                println!("{} = {}", key, ctx.config.get(key)?);
            }
        }
        (Some(key), None) => println!("{} = {}", key, ctx.config.get(key)?),
        (Some(key), Some(value)) => {
            ctx.config.set(key, &value)?;
            ctx.config.save(&ctx.root)?;
            println!("{}", format!("{} = {}", key, ctx.config.get(key)?).green());
        }
    }
    Ok(())
}

/// Accepts a single `{func, params}` request or a `{tool_calls: [...]}`
/// envelope on stdin. Failed calls are reported in their response, not
/// through the exit code.
fn handle_exec(ctx: &mut AppContext) -> Result<()> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;

    let responses: Vec<Response> = match parse_requests(&input) {
        Ok(requests) => requests
            .iter()
            .map(|request| dispatch::dispatch(&mut ctx.api, request))
            .collect(),
        Err(e) => vec![Response::failure(&e)],
    };

    for response in &responses {
        println!("{}", serde_json::to_string(response)?);
    }
    Ok(())
}

fn parse_requests(input: &str) -> Result<Vec<Request>> {
    let invalid = |e: serde_json::Error| NotepadError::Validation(format!("Invalid request: {}", e));
    let value: serde_json::Value = serde_json::from_str(input).map_err(invalid)?;

    if value.get("tool_calls").is_some() {
        let envelope: Envelope = serde_json::from_value(value).map_err(invalid)?;
        Ok(envelope.tool_calls)
    } else {
        let request: Request = serde_json::from_value(value).map_err(invalid)?;
        Ok(vec![request])
    }
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

fn print_notepad(notepad: &Notepad) {
    println!(
        "{} {}",
        notepad.title.bold(),
        format!("({})", notepad.game).dimmed()
    );
    println!("--------------------------------");
    if notepad.entries.is_empty() {
        println!("{}", "No entries.".dimmed());
        return;
    }
    let mut entries: Vec<_> = notepad.entries.iter().collect();
    entries.sort_by_key(|e| e.id);
    for entry in entries {
        println!(
            "{} {}  {}",
            format!("#{}", entry.id).yellow(),
            entry.content,
            format_time_ago(entry.created_at).trim_start().dimmed()
        );
    }
}

const LINE_WIDTH: usize = 80;
const TIME_WIDTH: usize = 16;
const COUNT_WIDTH: usize = 12;

fn print_summaries(summaries: &[NotepadSummary]) {
    for summary in summaries {
        let left_prefix = "  ";
        let count = format!("{} entries", summary.entry_count);
        let available = LINE_WIDTH.saturating_sub(left_prefix.width() + COUNT_WIDTH + TIME_WIDTH);

        let title_display = truncate_to_width(&summary.title, available);
        let padding = available.saturating_sub(title_display.width());

        println!(
            "{}{}{}{}{}",
            left_prefix,
            title_display,
            " ".repeat(padding),
            format!("{:>width$}", count, width = COUNT_WIDTH).cyan(),
            format_time_ago(summary.updated_at).dimmed()
        );
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: chrono::DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = timeago::Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
