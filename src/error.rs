//! Error types for tasktrack
//!
//! Exit codes:
//! - 0: Success (including "not found" and "invalid status" outcomes)
//! - 2: User error (bad config, bad argument)
//! - 4: Operation failed (I/O, unreadable task file)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the tasktrack CLI
pub mod exit_codes {
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for tasktrack operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid status '{0}'. Use: todo | in_progress | done")]
    InvalidStatus(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse task file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidConfig(_)
            | Error::InvalidArgument(_)
            | Error::InvalidStatus(_)
            | Error::TomlParse(_) => exit_codes::USER_ERROR,

            Error::Io(_) | Error::Parse { .. } | Error::Json(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Stable category name for JSON error output
    pub fn kind(&self) -> &'static str {
        match self.exit_code() {
            exit_codes::USER_ERROR => "user_error",
            _ => "operation_failed",
        }
    }

    /// Structured context for JSON error output
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::Parse { path, source } => Some(serde_json::json!({
                "path": path.to_string_lossy(),
                "line": source.line(),
                "column": source.column(),
            })),
            Error::InvalidStatus(value) => Some(serde_json::json!({
                "status": value,
                "allowed": ["todo", "in_progress", "done"],
            })),
            Error::InvalidConfig(message) => Some(serde_json::json!({ "message": message })),
            _ => None,
        }
    }
}

/// Result type alias for tasktrack operations
pub type Result<T> = std::result::Result<T, Error>;

/// Body of the `error` field in a JSON error envelope
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub message: String,
    pub code: i32,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            message: err.to_string(),
            code: err.exit_code(),
            kind: err.kind(),
            details: err.details(),
        }
    }
}
