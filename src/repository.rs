//! Task repository: the in-memory task list paired with its JSON file.
//!
//! Every operation runs under one exclusive lock owned by the repository.
//! Mutations rewrite the whole file before returning; if the write fails the
//! in-memory change is reverted, so the cache and the file never diverge.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::codec;
use crate::error::{Error, Result};
use crate::storage;
use crate::task::{Task, TaskUpdate};

/// Default task file name, relative to the working directory.
pub const DEFAULT_TASKS_FILE: &str = "tasks.json";

/// Result of [`TaskRepository::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The task was changed and persisted; carries the new value.
    Updated(Task),
    /// No task has the given id.
    NotFound,
    /// The requested status is not one of the allowed values. Nothing changed.
    InvalidStatus(String),
}

impl UpdateOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, UpdateOutcome::Updated(_))
    }
}

#[derive(Debug)]
pub struct TaskRepository {
    path: PathBuf,
    tasks: Mutex<Vec<Task>>,
}

impl TaskRepository {
    /// Open the task file at `path`, creating it with an empty list if needed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            debug!(path = %path.display(), "creating empty task file");
            storage::write_atomic(&path, &codec::encode(&[])?)?;
        }

        let tasks = load(&path)?;
        debug!(path = %path.display(), count = tasks.len(), "loaded tasks");
        Ok(Self {
            path,
            tasks: Mutex::new(tasks),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the backing file. The cache is untouched if the read fails.
    pub fn reload(&self) -> Result<()> {
        let mut tasks = self.tasks.lock();
        let loaded = load(&self.path)?;
        debug!(path = %self.path.display(), count = loaded.len(), "reloaded tasks");
        *tasks = loaded;
        Ok(())
    }

    pub fn list_all(&self) -> Vec<Task> {
        self.tasks.lock().clone()
    }

    /// Tasks whose status matches `status` case-insensitively, in list order.
    pub fn list_by_status(&self, status: &str) -> Vec<Task> {
        self.tasks
            .lock()
            .iter()
            .filter(|task| task.status.matches(status))
            .cloned()
            .collect()
    }

    /// Append a new `todo` task and persist it.
    pub fn add(
        &self,
        title: impl Into<String>,
        tags: Option<Vec<String>>,
        notes: Option<String>,
    ) -> Result<Task> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(Error::InvalidArgument("title cannot be empty".to_string()));
        }

        let mut tasks = self.tasks.lock();
        let mut task = Task::new(title, tags.unwrap_or_default(), notes);
        while tasks.iter().any(|existing| existing.id == task.id) {
            task.id = Uuid::new_v4().to_string();
        }

        tasks.push(task.clone());
        if let Err(err) = self.persist(&tasks) {
            tasks.pop();
            warn!(id = %task.id, error = %err, "add rolled back");
            return Err(err);
        }

        info!(id = %task.id, "task added");
        Ok(task)
    }

    /// Apply a partial update to the task with `id`.
    ///
    /// An invalid status rejects the whole update before anything changes.
    pub fn update(&self, id: &str, update: TaskUpdate) -> Result<UpdateOutcome> {
        let mut tasks = self.tasks.lock();
        let Some(index) = position(&tasks, id) else {
            return Ok(UpdateOutcome::NotFound);
        };

        let status = match update.parsed_status() {
            Ok(status) => status,
            Err(Error::InvalidStatus(value)) => {
                debug!(id, status = %value, "update rejected");
                return Ok(UpdateOutcome::InvalidStatus(value));
            }
            Err(err) => return Err(err),
        };

        let previous = tasks[index].clone();
        tasks[index].apply(update, status);
        if let Err(err) = self.persist(&tasks) {
            tasks[index] = previous;
            warn!(id, error = %err, "update rolled back");
            return Err(err);
        }

        let updated = tasks[index].clone();
        info!(id, status = %updated.status, "task updated");
        Ok(UpdateOutcome::Updated(updated))
    }

    /// Remove the task with `id`. Returns whether a task was removed.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut tasks = self.tasks.lock();
        let Some(index) = position(&tasks, id) else {
            return Ok(false);
        };

        let removed = tasks.remove(index);
        if let Err(err) = self.persist(&tasks) {
            tasks.insert(index, removed);
            warn!(id, error = %err, "delete rolled back");
            return Err(err);
        }

        info!(id, "task deleted");
        Ok(true)
    }

    /// Full rewrite of the backing file. Callers hold the lock.
    fn persist(&self, tasks: &[Task]) -> Result<()> {
        let data = codec::encode(tasks)?;
        storage::write_atomic(&self.path, &data)?;
        debug!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }
}

fn load(path: &Path) -> Result<Vec<Task>> {
    let bytes = storage::read_file(path)?;
    codec::decode_file(path, &bytes)
}

fn position(tasks: &[Task], id: &str) -> Option<usize> {
    tasks.iter().position(|task| task.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;
    use std::fs;
    use tempfile::TempDir;

    fn open_in(dir: &TempDir) -> TaskRepository {
        TaskRepository::open(dir.path().join(DEFAULT_TASKS_FILE)).expect("open")
    }

    /// Replace the task file with a directory so the next save fails.
    fn break_file(repo: &TaskRepository) {
        fs::remove_file(repo.path()).expect("remove task file");
        fs::create_dir(repo.path()).expect("create blocking dir");
    }

    #[test]
    fn open_creates_empty_file() {
        let dir = TempDir::new().unwrap();
        let repo = open_in(&dir);
        assert!(repo.list_all().is_empty());
        assert_eq!(fs::read_to_string(repo.path()).unwrap().trim(), "[]");
    }

    #[test]
    fn open_fails_on_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_TASKS_FILE);
        fs::write(&path, "[{").unwrap();
        let err = TaskRepository::open(&path).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn add_rejects_blank_title() {
        let dir = TempDir::new().unwrap();
        let repo = open_in(&dir);
        let err = repo.add("  ", None, None).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(repo.list_all().is_empty());
    }

    #[test]
    fn add_rolls_back_when_save_fails() {
        let dir = TempDir::new().unwrap();
        let repo = open_in(&dir);
        repo.add("kept", None, None).unwrap();
        break_file(&repo);

        let err = repo.add("lost", None, None).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        let titles: Vec<String> = repo.list_all().into_iter().map(|task| task.title).collect();
        assert_eq!(titles, vec!["kept".to_string()]);
    }

    #[test]
    fn update_rolls_back_when_save_fails() {
        let dir = TempDir::new().unwrap();
        let repo = open_in(&dir);
        let task = repo.add("task", None, None).unwrap();
        break_file(&repo);

        let update = TaskUpdate {
            title: Some("renamed".to_string()),
            status: Some("done".to_string()),
            ..TaskUpdate::default()
        };
        assert!(repo.update(&task.id, update).is_err());
        assert_eq!(repo.list_all(), vec![task]);
    }

    #[test]
    fn delete_rolls_back_when_save_fails() {
        let dir = TempDir::new().unwrap();
        let repo = open_in(&dir);
        let first = repo.add("first", None, None).unwrap();
        let second = repo.add("second", None, None).unwrap();
        break_file(&repo);

        assert!(repo.delete(&first.id).is_err());
        assert_eq!(repo.list_all(), vec![first, second]);
    }

    #[test]
    fn invalid_status_skips_persistence() {
        let dir = TempDir::new().unwrap();
        let repo = open_in(&dir);
        let task = repo.add("task", None, None).unwrap();
        // A broken file would surface as an error if a save were attempted.
        break_file(&repo);

        let update = TaskUpdate {
            title: Some("renamed".to_string()),
            status: Some("bogus".to_string()),
            ..TaskUpdate::default()
        };
        let outcome = repo.update(&task.id, update).unwrap();
        assert_eq!(outcome, UpdateOutcome::InvalidStatus("bogus".to_string()));
        assert_eq!(repo.list_all()[0].status, TaskStatus::Todo);
        assert_eq!(repo.list_all()[0].title, "task");
    }

    #[test]
    fn reload_keeps_cache_on_error() {
        let dir = TempDir::new().unwrap();
        let repo = open_in(&dir);
        repo.add("task", None, None).unwrap();
        fs::write(repo.path(), "not json").unwrap();

        assert!(repo.reload().is_err());
        assert_eq!(repo.list_all().len(), 1);
    }
}
