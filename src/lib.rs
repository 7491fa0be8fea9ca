//! tasktrack - Task Tracker Library
//!
//! This library provides the core functionality for the tasktrack CLI: a
//! task list persisted as a single JSON file and rewritten in full on every
//! change.
//!
//! # Core Concepts
//!
//! - **Tasks**: titled work items with a status (`todo`, `in_progress`,
//!   `done`), tags, notes and creation/update timestamps
//! - **Repository**: the sole owner of the in-memory list and its file;
//!   all access goes through one lock
//! - **Codec**: JSON encoding with lenient timestamp decoding
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `codec`: JSON encode/decode for the task file
//! - `config`: Configuration loading from `.tasktrack.toml`
//! - `error`: Error types and result aliases
//! - `output`: Human and JSON output
//! - `repository`: The task repository
//! - `storage`: Atomic whole-file writes
//! - `task`: Task data model

pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod output;
pub mod repository;
pub mod storage;
pub mod task;

pub use error::{Error, Result};
pub use repository::{TaskRepository, UpdateOutcome};
pub use task::{Task, TaskStatus, TaskUpdate};
