//! Configuration loading and management
//!
//! Handles parsing of `kb.toml` configuration files. Lookup order:
//! 1) `kb.toml` in the working directory
//! 2) `config.toml` in the platform config dir
//! 3) built-in defaults
//!
//! A file that fails to parse or validate falls back to defaults; the
//! CLI never refuses to start over a broken config.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::task::Status;

const CONFIG_FILENAME: &str = "kb.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Store location configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Board behavior configuration
    #[serde(default)]
    pub board: BoardConfig,
}

/// Store-related configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding the JSON documents, when not given on the
    /// command line or via `KB_DIR`
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Board-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Column new tasks land in when none is given
    #[serde(default = "default_status")]
    pub default_status: String,

    /// Whether the done column starts visible
    #[serde(default = "default_show_completed")]
    pub show_completed: bool,
}

fn default_status() -> String {
    "todo".to_string()
}

fn default_show_completed() -> bool {
    true
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            default_status: default_status(),
            show_completed: default_show_completed(),
        }
    }
}

impl BoardConfig {
    /// Parsed form of `default_status`.
    pub fn initial_status(&self) -> Status {
        self.default_status.parse().unwrap_or_default()
    }

    fn validate(&self) -> Result<()> {
        self.default_status.parse::<Status>().map_err(|_| {
            Error::InvalidConfig(format!(
                "board.default_status '{}' is not a column (expected todo|doing|done)",
                self.default_status
            ))
        })?;
        Ok(())
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the first config file found, or return defaults
    pub fn load_default() -> Self {
        for path in candidate_paths() {
            if path.exists() {
                return Self::load(&path).unwrap_or_default();
            }
        }
        Self::default()
    }

    fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.store.dir {
            if dir.as_os_str().is_empty() {
                return Err(Error::InvalidConfig(
                    "store.dir cannot be empty".to_string(),
                ));
            }
        }
        self.board.validate()?;
        Ok(())
    }
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILENAME)];
    if let Some(dirs) = ProjectDirs::from("", "", "kb") {
        paths.push(dirs.config_dir().join("config.toml"));
    }
    paths
}

/// Platform data dir for the store when nothing else names one.
pub fn default_store_dir() -> PathBuf {
    ProjectDirs::from("", "", "kb")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".kb"))
}

/// Pick the store directory: CLI flag (or `KB_DIR`, which clap folds
/// into the flag), then config, then the platform data dir.
pub fn resolve_store_dir(flag: Option<PathBuf>, config: &Config) -> PathBuf {
    if let Some(dir) = flag {
        return dir;
    }
    if let Some(dir) = &config.store.dir {
        return dir.clone();
    }
    default_store_dir()
}
