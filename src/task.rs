//! Task data model.
//!
//! A [`Task`] serializes to the on-disk shape used by `tasks.json`
//! (camelCase keys, RFC 3339 timestamps). Timestamp and tag decoding is
//! lenient; see [`crate::codec`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::codec;
use crate::error::{Error, Result};

/// Allowed status values, in workflow order.
pub const TASK_STATUSES: [&str; 3] = ["todo", "in_progress", "done"];

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }

    /// Case-insensitive comparison against a user-supplied filter.
    pub fn matches(&self, filter: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(filter.trim())
    }

    fn parse_loose(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.matches(value))
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parse: only the exact lowercase names are accepted.
impl FromStr for TaskStatus {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "todo" => Ok(TaskStatus::Todo),
            "in_progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        TaskStatus::parse_loose(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "unknown task status '{raw}' (expected {})",
                TASK_STATUSES.join(" | ")
            ))
        })
    }
}

/// A single tracked unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    #[serde(
        serialize_with = "codec::serialize_timestamp",
        deserialize_with = "codec::lenient_timestamp",
        default = "codec::epoch"
    )]
    pub created_at: DateTime<Utc>,
    #[serde(
        serialize_with = "codec::serialize_timestamp",
        deserialize_with = "codec::lenient_timestamp",
        default = "codec::epoch"
    )]
    pub updated_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "codec::nullable_tags")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Task {
    /// Build a fresh `todo` task stamped with the current time.
    pub fn new(title: impl Into<String>, tags: Vec<String>, notes: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            status: TaskStatus::Todo,
            created_at: now,
            updated_at: now,
            tags,
            notes,
        }
    }

    /// Apply a validated update and refresh `updated_at`.
    ///
    /// `updated_at` never moves backwards, even if the wall clock does.
    pub(crate) fn apply(&mut self, update: TaskUpdate, status: Option<TaskStatus>) {
        if let Some(title) = update.title {
            if !title.trim().is_empty() {
                self.title = title;
            }
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        if let Some(notes) = update.notes {
            self.notes = Some(notes);
        }
        self.updated_at = Utc::now().max(self.updated_at);
    }
}

/// Listing form: `id | status | title`.
impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {} | {}", self.id, self.status, self.title)
    }
}

/// Partial update request. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub status: Option<String>,
    pub tags: Option<Vec<String>>,
    pub notes: Option<String>,
}

impl TaskUpdate {
    /// Validate the requested status. Blank means "not supplied".
    pub fn parsed_status(&self) -> Result<Option<TaskStatus>> {
        match self.status.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw.parse().map(Some),
            _ => Ok(None),
        }
    }
}
