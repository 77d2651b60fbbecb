//! # Notepad Architecture
//!
//! Notepad keeps per-game notebooks for a game assistant: each game owns a set
//! of titled notepads, each notepad an ordered list of numbered entries. It is
//! a **library first**; the `notepad` binary and the JSON command surface are
//! two thin clients of the same core.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Surfaces (main.rs + args.rs, dispatch.rs)                  │
//! │  - CLI: parses arguments, prints, owns stdout/exit codes    │
//! │  - Dispatch: {func, params} requests → JSON responses       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Resolves the default game                                │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs, recycle.rs)                  │
//! │  - Business logic: entries, search, export, undo            │
//! │  - Operates on Rust types, returns Rust types               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DataStore trait                                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No Global State
//!
//! The store root, export directory and configuration are carried by a
//! [`api::NotepadApi`] handle built once at startup. Nothing in the library
//! reads the environment or writes to stdout; diagnostics go through `log`.
//!
//! ## Undo
//!
//! Every delete and clear first copies the affected notepads into the recycle
//! bin ([`recycle`]). Only the latest operation is kept, and restoring it
//! empties the bin.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`dispatch`]: Operation table behind the JSON command surface
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Notepad`, `Entry`, `Snapshot`)
//! - [`recycle`]: Single-level recycle bin
//! - [`sanitize`]: Game and title to filename mapping
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod model;
pub mod recycle;
pub mod sanitize;
pub mod store;
