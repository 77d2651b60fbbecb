//! # Command Surface
//!
//! Requests arrive as an operation name plus a flat map of string parameters:
//!
//! ```json
//! { "func": "create_note", "params": { "current_game": "Cyberpunk 2077", "title": "Missions", "content": "Kill 100 monsters" } }
//! ```
//!
//! Several requests may be batched in an envelope: `{ "tool_calls": [ ... ] }`.
//!
//! Operation names form a closed set ([`Operation`]); each maps to exactly one
//! handler in [`handler`]. Every error is caught here and turned into a
//! failure [`Response`] carrying the message and its [`ErrorKind`].

use crate::api::{ClearScope, CmdResult, ExportScope, NotepadApi};
use crate::error::{ErrorKind, NotepadError, Result};
use crate::store::DataStore;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub type Params = HashMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateNote,
    ReadNote,
    ListNotes,
    DeleteNote,
    SearchNotes,
    ExportNotes,
    ClearNotes,
    UndoClear,
}

impl Operation {
    pub const ALL: [Operation; 8] = [
        Operation::CreateNote,
        Operation::ReadNote,
        Operation::ListNotes,
        Operation::DeleteNote,
        Operation::SearchNotes,
        Operation::ExportNotes,
        Operation::ClearNotes,
        Operation::UndoClear,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::CreateNote => "create_note",
            Operation::ReadNote => "read_note",
            Operation::ListNotes => "list_notes",
            Operation::DeleteNote => "delete_note",
            Operation::SearchNotes => "search_notes",
            Operation::ExportNotes => "export_notes",
            Operation::ClearNotes => "clear_notes",
            Operation::UndoClear => "undo_clear",
        }
    }
}

impl FromStr for Operation {
    type Err = NotepadError;

    fn from_str(s: &str) -> Result<Self> {
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.name() == s)
            .ok_or_else(|| NotepadError::Validation(format!("Unknown function call: {}", s)))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    pub func: String,
    #[serde(default)]
    pub params: Params,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub tool_calls: Vec<Request>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl Response {
    pub fn failure(err: &NotepadError) -> Self {
        Self {
            success: false,
            message: Some(err.to_string()),
            data: None,
            error_kind: Some(err.kind()),
        }
    }
}

pub type Handler<S> = fn(&mut NotepadApi<S>, &Params) -> Result<CmdResult>;

/// The dispatch table.
pub fn handler<S: DataStore>(op: Operation) -> Handler<S> {
    match op {
        Operation::CreateNote => create_note,
        Operation::ReadNote => read_note,
        Operation::ListNotes => list_notes,
        Operation::DeleteNote => delete_note,
        Operation::SearchNotes => search_notes,
        Operation::ExportNotes => export_notes,
        Operation::ClearNotes => clear_notes,
        Operation::UndoClear => undo_clear,
    }
}

pub fn dispatch<S: DataStore>(api: &mut NotepadApi<S>, request: &Request) -> Response {
    let outcome = request
        .func
        .parse::<Operation>()
        .and_then(|op| handler::<S>(op)(api, &request.params).map(|result| (op, result)));

    match outcome {
        Ok((op, result)) => Response {
            success: true,
            message: Some(result.message_text()).filter(|m| !m.is_empty()),
            data: Some(response_data(op, &request.params, &result)),
            error_kind: None,
        },
        Err(e) => {
            log::error!("{} failed: {}", request.func, e);
            Response::failure(&e)
        }
    }
}

/// Handle every request of an envelope in order.
pub fn dispatch_envelope<S: DataStore>(api: &mut NotepadApi<S>, envelope: &Envelope) -> Vec<Response> {
    envelope
        .tool_calls
        .iter()
        .map(|request| dispatch(api, request))
        .collect()
}

fn param<'a>(params: &'a Params, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

fn required<'a>(params: &'a Params, key: &str, what: &str) -> Result<&'a str> {
    param(params, key).ok_or_else(|| NotepadError::missing_param(key, what))
}

fn game(params: &Params) -> Option<&str> {
    param(params, "current_game")
}

fn create_note<S: DataStore>(api: &mut NotepadApi<S>, params: &Params) -> Result<CmdResult> {
    let title = required(params, "title", "notepad name")?;
    required(params, "content", "entry to add")?;
    // Content is stored verbatim, surrounding whitespace included.
    let content = params.get("content").map(String::as_str).unwrap_or_default();
    api.create_note(game(params), title, content)
}

fn read_note<S: DataStore>(api: &mut NotepadApi<S>, params: &Params) -> Result<CmdResult> {
    let title = required(params, "title", "notepad name")?;
    api.read_note(game(params), title)
}

fn list_notes<S: DataStore>(api: &mut NotepadApi<S>, params: &Params) -> Result<CmdResult> {
    api.list_notes(game(params))
}

fn delete_note<S: DataStore>(api: &mut NotepadApi<S>, params: &Params) -> Result<CmdResult> {
    let title = required(params, "title", "notepad name")?;
    api.delete_note(game(params), title)
}

fn search_notes<S: DataStore>(api: &mut NotepadApi<S>, params: &Params) -> Result<CmdResult> {
    let query = required(params, "query", "text to search for")?;
    let all_games = param(params, "scope").is_some_and(|s| s.eq_ignore_ascii_case("all"));
    api.search_notes(game(params), param(params, "title"), query, all_games)
}

fn export_notes<S: DataStore>(api: &mut NotepadApi<S>, params: &Params) -> Result<CmdResult> {
    let scope: ExportScope = param(params, "scope").unwrap_or("game").parse()?;
    api.export_notes(scope, game(params), param(params, "title"))
}

fn clear_notes<S: DataStore>(api: &mut NotepadApi<S>, params: &Params) -> Result<CmdResult> {
    let scope: ClearScope = param(params, "scope").unwrap_or("game").parse()?;
    api.clear_notes(scope, game(params))
}

fn undo_clear<S: DataStore>(api: &mut NotepadApi<S>, _params: &Params) -> Result<CmdResult> {
    api.undo_clear()
}

fn response_data(op: Operation, params: &Params, result: &CmdResult) -> Value {
    match op {
        Operation::CreateNote => json!({ "game": result.game, "entry": result.entry }),
        Operation::ReadNote => json!({ "game": result.game, "notepad": result.notepad }),
        Operation::ListNotes => json!({ "game": result.game, "notepads": result.summaries }),
        Operation::DeleteNote | Operation::ClearNotes => {
            json!({ "game": result.game, "removed": result.affected })
        }
        Operation::UndoClear => json!({ "restored": result.affected }),
        Operation::SearchNotes => json!({
            "game": result.game,
            "query": param(params, "query"),
            "results": result.hits,
        }),
        Operation::ExportNotes => json!({
            "exported_file": result.export_path,
            "export_location": result.export_path.as_ref().and_then(|p| p.parent()),
        }),
    }
}
