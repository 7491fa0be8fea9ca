//! File I/O helpers for the task file.
//!
//! Every save is a whole-file rewrite. Writes go to a sibling temp file that
//! is renamed over the target, so readers never observe a partial document.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Atomically write data to a file (write temp, then rename).
///
/// Missing parent directories are created. On failure the temp file is
/// removed and the target is left as it was.
pub fn write_atomic(path: impl AsRef<Path>, data: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = temp_path_for(path);
    let result = write_and_rename(&temp_path, path, data);
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_and_rename(temp_path: &Path, path: &Path, data: &[u8]) -> Result<()> {
    let mut temp_file = File::create(temp_path)?;
    temp_file.write_all(data)?;
    temp_file.sync_all()?;
    drop(temp_file);

    fs::rename(temp_path, path)?;
    Ok(())
}

/// Temp file in the same directory as `path` (rename must not cross devices).
fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "tasks".to_string());
    path.with_file_name(format!(".{}.tmp.{}", file_name, std::process::id()))
}

/// Read the whole file.
pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    Ok(fs::read(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("tasks.json");

        write_atomic(&file_path, b"[]").unwrap();
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "[]");

        // Overwrite
        write_atomic(&file_path, b"[1]").unwrap();
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "[1]");
    }

    #[test]
    fn creates_missing_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("nested").join("deeper").join("tasks.json");

        write_atomic(&file_path, b"[]").unwrap();
        assert_eq!(read_file(&file_path).unwrap(), b"[]");
    }

    #[test]
    fn failed_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("tasks.json");
        // A directory at the target path makes the rename fail.
        fs::create_dir(&file_path).unwrap();

        assert!(write_atomic(&file_path, b"[]").is_err());
        let leftovers: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec![std::ffi::OsString::from("tasks.json")]);
    }

    #[test]
    fn read_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_file(temp_dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, crate::error::Error::Io(_)));
    }
}
