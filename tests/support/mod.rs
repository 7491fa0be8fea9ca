#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tasktrack::Task;
use tempfile::TempDir;

/// Command for the tasktrack binary with environment overrides cleared.
pub fn tasktrack_cmd() -> Command {
    let mut cmd = Command::cargo_bin("tasktrack").expect("binary");
    cmd.env_remove("TASKTRACK_FILE")
        .env_remove("TASKTRACK_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// A scratch directory acting as the working directory of the CLI.
pub struct TestStore {
    dir: TempDir,
}

impl TestStore {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn tasks_file(&self) -> PathBuf {
        self.dir.path().join("tasks.json")
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = tasktrack_cmd();
        cmd.current_dir(self.dir.path());
        cmd
    }

    pub fn write_file(&self, rel_path: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn read_tasks(&self) -> Result<Vec<Task>, Box<dyn std::error::Error>> {
        let bytes = fs::read(self.tasks_file())?;
        Ok(tasktrack::codec::decode(&bytes)?)
    }

    /// Run `add` and return the new task id parsed from `Added: <id>`.
    pub fn add(&self, args: &[&str]) -> Result<String, Box<dyn std::error::Error>> {
        let output = self.cmd().arg("add").args(args).assert().success().get_output().stdout.clone();
        let stdout = String::from_utf8(output)?;
        let id = stdout
            .trim()
            .strip_prefix("Added: ")
            .ok_or_else(|| format!("unexpected add output: {stdout}"))?;
        Ok(id.to_string())
    }
}
