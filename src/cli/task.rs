//! tasktrack command implementations.

use serde::Serialize;

use crate::cli::fields::FieldArgs;
use crate::cli::StoreArgs;
use crate::error::Result;
use crate::output::{emit_success, OutputOptions};
use crate::repository::UpdateOutcome;
use crate::task::{Task, TaskStatus, TASK_STATUSES};

const ADD_USAGE: &str = "add \"title\" [tags=...] [notes=...]";
const UPDATE_USAGE: &str = "update <id> [title=...] [status=...] [tags=...] [notes=...]";
const DELETE_USAGE: &str = "delete <id>";

pub struct ListOptions {
    pub filter: Option<String>,
    pub store: StoreArgs,
    pub output: OutputOptions,
}

pub struct AddOptions {
    pub title: Option<String>,
    pub fields: Vec<String>,
    pub store: StoreArgs,
    pub output: OutputOptions,
}

pub struct UpdateOptions {
    pub id: Option<String>,
    pub fields: Vec<String>,
    pub store: StoreArgs,
    pub output: OutputOptions,
}

pub struct DeleteOptions {
    pub id: Option<String>,
    pub store: StoreArgs,
    pub output: OutputOptions,
}

#[derive(Serialize)]
struct TaskListOutput {
    filter: String,
    total: usize,
    tasks: Vec<Task>,
}

#[derive(Serialize)]
struct TaskUpdateOutput {
    id: String,
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    task: Option<Task>,
    #[serde(skip_serializing_if = "Option::is_none")]
    invalid_status: Option<String>,
}

#[derive(Serialize)]
struct TaskDeleteOutput {
    id: String,
    deleted: bool,
}

#[derive(Serialize)]
struct UsageOutput {
    usage: &'static str,
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let repo = options.store.open()?;

    // Anything that is not a known status lists everything.
    let status = options
        .filter
        .as_deref()
        .and_then(|filter| TaskStatus::ALL.into_iter().find(|status| status.matches(filter)));
    let tasks = match status {
        Some(status) => repo.list_by_status(status.as_str()),
        None => repo.list_all(),
    };

    let human: Vec<String> = tasks.iter().map(Task::to_string).collect();
    let output = TaskListOutput {
        filter: status.map_or("all", |status| status.as_str()).to_string(),
        total: tasks.len(),
        tasks,
    };

    emit_success(options.output, "list", &output, &human)
}

pub fn run_add(options: AddOptions) -> Result<()> {
    let Some(title) = options.title else {
        return emit_usage(options.output, "add", ADD_USAGE);
    };

    let repo = options.store.open()?;
    let fields = FieldArgs::parse(&options.fields);
    let task = repo.add(title, fields.tags, fields.notes)?;

    let human = vec![format!("Added: {}", task.id)];
    emit_success(options.output, "add", &task, &human)
}

pub fn run_update(options: UpdateOptions) -> Result<()> {
    let Some(id) = options.id else {
        return emit_usage(options.output, "update", UPDATE_USAGE);
    };

    let repo = options.store.open()?;
    let update = FieldArgs::parse(&options.fields).into_update();
    let outcome = repo.update(&id, update)?;

    let (line, output) = match outcome {
        UpdateOutcome::Updated(task) => (
            "Updated.".to_string(),
            TaskUpdateOutput {
                id,
                outcome: "updated",
                task: Some(task),
                invalid_status: None,
            },
        ),
        UpdateOutcome::NotFound => (
            "Not found.".to_string(),
            TaskUpdateOutput {
                id,
                outcome: "not_found",
                task: None,
                invalid_status: None,
            },
        ),
        UpdateOutcome::InvalidStatus(value) => (
            format!("Invalid status. Use: {}", TASK_STATUSES.join(" | ")),
            TaskUpdateOutput {
                id,
                outcome: "invalid_status",
                task: None,
                invalid_status: Some(value),
            },
        ),
    };

    emit_success(options.output, "update", &output, &[line])
}

pub fn run_delete(options: DeleteOptions) -> Result<()> {
    let Some(id) = options.id else {
        return emit_usage(options.output, "delete", DELETE_USAGE);
    };

    let repo = options.store.open()?;
    let deleted = repo.delete(&id)?;

    let line = if deleted { "Deleted." } else { "Not found." };
    emit_success(
        options.output,
        "delete",
        &TaskDeleteOutput { id, deleted },
        &[line.to_string()],
    )
}

/// Missing required argument: remind the user instead of failing.
pub(super) fn emit_usage(
    output: OutputOptions,
    command: &str,
    usage: &'static str,
) -> Result<()> {
    emit_success(output, command, &UsageOutput { usage }, &[usage.to_string()])
}
