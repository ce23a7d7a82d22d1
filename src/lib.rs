//! kb - local-first kanban board library
//!
//! This library backs the kb CLI and TUI: a three-column task board
//! persisted as flat JSON documents, with optional local accounts.
//!
//! # Core Concepts
//!
//! - **Board**: the authoritative task collection for one partition
//! - **Partition**: whose tasks a store key addresses (anonymous or per user)
//! - **Filter pipeline**: pure conjunction of tag/assignee/done/search clauses
//! - **Drag protocol**: grab, hover, drop transitions behind card moves
//! - **Identity**: locally simulated accounts and the active session
//!
//! # Module Organization
//!
//! - `board`: task collection and mutations for one partition
//! - `cli`: command-line interface using clap
//! - `config`: configuration loading from `kb.toml`
//! - `drag`: drag-and-drop state machine
//! - `error`: error types and result aliases
//! - `filter`: filter and search pipeline
//! - `identity`: local accounts and session management
//! - `output`: JSON envelope and human rendering
//! - `seed`: demo board contents
//! - `settings`: persisted user preferences
//! - `store`: flat key-to-document persistence
//! - `task`: task records and field vocabularies
//! - `ui`: interactive board

pub mod board;
pub mod cli;
pub mod config;
pub mod drag;
pub mod error;
pub mod filter;
pub mod identity;
pub mod output;
pub mod seed;
pub mod settings;
pub mod store;
pub mod task;
pub mod ui;

pub use error::{Error, Result};
