//! Configuration loading and management
//!
//! Handles parsing of the optional `.tasktrack.toml` configuration file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::repository::DEFAULT_TASKS_FILE;

/// Name of the config file looked up in the working directory
pub const CONFIG_FILE: &str = ".tasktrack.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Task store configuration
    #[serde(default)]
    pub store: StoreConfig,
}

/// Task store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the task file. Relative paths resolve against the config file's directory.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_TASKS_FILE)
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.validate()?;

        if config.store.path.is_relative() {
            if let Some(base) = path.parent() {
                config.store.path = base.join(&config.store.path);
            }
        }
        Ok(config)
    }

    /// Load `.tasktrack.toml` from `dir`, or return defaults when it is absent.
    ///
    /// A file that exists but does not parse is still an error.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve which task file to use: explicit override first, then config.
    pub fn tasks_file(&self, explicit: Option<&Path>) -> PathBuf {
        match explicit {
            Some(path) => path.to_path_buf(),
            None => self.store.path.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.store.path.as_os_str().to_string_lossy().trim().is_empty() {
            return Err(Error::InvalidConfig("store.path cannot be empty".to_string()));
        }
        Ok(())
    }
}
