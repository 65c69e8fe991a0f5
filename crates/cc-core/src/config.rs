//! User configuration stored in `~/.claude-commit/config.json`
//!
//! The file is optional. A missing file yields the defaults, and an empty
//! `model` value is read back as the default model.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "haiku";

/// Changed-file count at which the reviewer only receives a diff summary
pub const DEFAULT_SUMMARY_THRESHOLD: usize = 20;

/// Directory name under the user's home directory
pub const CONFIG_DIR_NAME: &str = ".claude-commit";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Persisted user preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Model passed to the reviewer CLI (`--model`)
    #[serde(default = "default_model")]
    pub model: String,

    /// Number of changed files at which summary mode is used
    #[serde(default = "default_summary_threshold")]
    pub summary_threshold: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            summary_threshold: default_summary_threshold(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

const fn default_summary_threshold() -> usize {
    DEFAULT_SUMMARY_THRESHOLD
}

impl Config {
    /// Whether `file_count` changed files should be reviewed as a summary
    pub fn use_summary_mode(&self, file_count: usize) -> bool {
        file_count >= self.summary_threshold
    }
}

/// Loads and saves [`Config`] from a configuration directory
#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_dir: PathBuf,
}

impl ConfigStore {
    /// Create a store rooted at `~/.claude-commit`
    pub fn new() -> Result<Self> {
        let home = directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().to_path_buf())
            .ok_or(Error::HomeDirNotFound)?;

        Ok(Self::with_dir(home.join(CONFIG_DIR_NAME)))
    }

    /// Create a store with a custom config directory
    pub fn with_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Directory holding the configuration file
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Full path of the configuration file
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    /// Load the configuration, falling back to defaults when the file is absent
    pub fn load(&self) -> Result<Config> {
        let path = self.config_path();

        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let mut config: Config = serde_json::from_str(&content)
            .map_err(|e| Error::invalid_config(&path, e.to_string()))?;

        if config.model.trim().is_empty() {
            config.model = default_model();
        }

        debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Save the configuration, creating the directory if needed
    pub fn save(&self, config: &Config) -> Result<()> {
        fs::create_dir_all(&self.config_dir)?;

        let content = serde_json::to_string_pretty(config)?;
        let path = self.config_path();
        fs::write(&path, content)?;

        debug!("Saved config to {}", path.display());
        Ok(())
    }
}
