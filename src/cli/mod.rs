//! Command-line interface for tasktrack
//!
//! This module defines the CLI structure using clap derive macros.
//! Command runners live in [`task`]; `key=value` parsing in [`fields`].

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::output::OutputOptions;
use crate::repository::TaskRepository;

pub mod fields;
mod task;

/// Printed when no command is given.
pub const USAGE: &str = "\
Task Tracker (single file)
Usage:
  tasktrack list [all|todo|in_progress|done]
  tasktrack add \"title\" [tags=tag1,tag2] [notes=\"...\"]
  tasktrack update <id> [title=\"...\"] [status=todo|in_progress|done] [tags=a,b] [notes=\"...\"]
  tasktrack delete <id>
";

/// tasktrack - a task tracker backed by a single JSON file
#[derive(Parser, Debug)]
#[command(name = "tasktrack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the task file (defaults to tasks.json)
    #[arg(long, global = true, env = "TASKTRACK_FILE")]
    pub file: Option<PathBuf>,

    /// Path to the config file (defaults to .tasktrack.toml when present)
    #[arg(long, global = true, env = "TASKTRACK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List tasks, optionally filtered by status
    List {
        /// Status filter: all, todo, in_progress, done
        #[arg(allow_hyphen_values = true)]
        filter: Option<String>,

        /// Ignored
        #[arg(hide = true)]
        _rest: Vec<String>,
    },

    /// Add a task
    Add {
        /// Task title
        #[arg(allow_hyphen_values = true)]
        title: Option<String>,

        /// Extra fields: tags=a,b notes="..."
        fields: Vec<String>,
    },

    /// Update fields of a task
    Update {
        /// Task id
        #[arg(allow_hyphen_values = true)]
        id: Option<String>,

        /// Fields to change: title=... status=... tags=... notes=...
        fields: Vec<String>,
    },

    /// Delete a task
    Delete {
        /// Task id
        #[arg(allow_hyphen_values = true)]
        id: Option<String>,

        /// Ignored
        #[arg(hide = true)]
        _rest: Vec<String>,
    },
}

/// Where to find the task file.
#[derive(Debug, Clone, Default)]
pub struct StoreArgs {
    pub file: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

impl StoreArgs {
    /// Resolve the task file and open the repository on it.
    pub fn open(&self) -> Result<TaskRepository> {
        let config = match self.config.as_deref() {
            Some(path) => Config::load(path)?,
            None => Config::load_from_dir(Path::new("."))?,
        };
        let path = config.tasks_file(self.file.as_deref());
        tracing::debug!(path = %path.display(), "opening task store");
        TaskRepository::open(path)
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let output = OutputOptions {
            json: self.json,
            quiet: self.quiet,
        };
        let Some(command) = self.command else {
            return task::emit_usage(output, "tasktrack", USAGE.trim_end());
        };

        let store = StoreArgs {
            file: self.file,
            config: self.config,
        };

        match command {
            Commands::List { filter, .. } => task::run_list(task::ListOptions {
                filter,
                store,
                output,
            }),
            Commands::Add { title, fields } => task::run_add(task::AddOptions {
                title,
                fields,
                store,
                output,
            }),
            Commands::Update { id, fields } => task::run_update(task::UpdateOptions {
                id,
                fields,
                store,
                output,
            }),
            Commands::Delete { id, .. } => {
                task::run_delete(task::DeleteOptions { id, store, output })
            }
        }
    }
}
