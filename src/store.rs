//! Flat key-value persistence for board state.
//!
//! All state lives as one JSON document per key in a single directory:
//!
//! ```text
//! <store dir>/
//!   tasks.json             # Anonymous task partition
//!   tasks_<user-id>.json   # Per-account task partition
//!   user.json              # Active session (absent when signed out)
//!   users.json             # Credential table, keyed by email
//!   userSettings.json      # Persisted preferences
//! ```
//!
//! Reads and writes of these documents never fail loudly. A missing
//! document reads as absent, an unreadable one degrades to a logged
//! warning, and a failed write leaves the previous document in place
//! with nothing persisted. Callers keep working from in-memory state
//! either way.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::error::Result;
use crate::task::Task;

/// Key of the anonymous task partition.
pub const KEY_TASKS: &str = "tasks";

/// Key of the active session document.
pub const KEY_USER: &str = "user";

/// Key of the credential table.
pub const KEY_USERS: &str = "users";

/// Key of the persisted preferences document.
pub const KEY_SETTINGS: &str = "userSettings";

/// Which task collection a board operation targets.
///
/// Every adapter call takes the partition explicitly; there is no
/// ambient "current partition" state to fall out of sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    /// Shared collection used while signed out.
    Anonymous,
    /// Private collection of one account.
    User(Uuid),
}

impl Partition {
    pub fn for_user(user_id: Option<Uuid>) -> Self {
        match user_id {
            Some(id) => Partition::User(id),
            None => Partition::Anonymous,
        }
    }

    /// Storage key of this partition's task document.
    pub fn key(&self) -> String {
        match self {
            Partition::Anonymous => KEY_TASKS.to_string(),
            Partition::User(id) => format!("{KEY_TASKS}_{id}"),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Partition::Anonymous)
    }
}

/// Storage manager for the board's document directory.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    /// Open (creating if needed) the document directory.
    pub fn open(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the document backing a key.
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    // =========================================================================
    // Task documents
    // =========================================================================

    /// Load a partition's task collection.
    ///
    /// `None` means the key has never been written, which is the signal
    /// for one-time demo seeding. A document that exists but cannot be
    /// read or parsed yields `Some(vec![])` so seeding is not retriggered
    /// over data that merely failed to load.
    pub fn load_tasks(&self, partition: &Partition) -> Option<Vec<Task>> {
        let key = partition.key();
        let path = self.key_path(&key);
        if !path.exists() {
            return None;
        }
        match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(tasks) => Some(tasks),
                Err(err) => {
                    warn!(%key, error = %err, "task document is not valid JSON; treating as empty");
                    Some(Vec::new())
                }
            },
            Err(err) => {
                warn!(%key, error = %err, "task document could not be read; treating as empty");
                Some(Vec::new())
            }
        }
    }

    /// Overwrite a partition's task collection.
    ///
    /// Failures are logged and swallowed; the previous document stays
    /// intact and nothing is retried.
    pub fn save_tasks(&self, partition: &Partition, tasks: &[Task]) {
        let key = partition.key();
        if let Err(err) = self.write_json(&self.key_path(&key), &tasks) {
            warn!(%key, error = %err, "task save failed; nothing persisted");
        }
    }

    // =========================================================================
    // Session / credential / settings documents
    // =========================================================================

    /// Read a named document, or `None` when absent or unreadable.
    pub fn read_doc<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.key_path(key);
        if !path.exists() {
            return None;
        }
        match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(value) => Some(value),
                Err(err) => {
                    warn!(%key, error = %err, "document is not valid JSON; ignoring");
                    None
                }
            },
            Err(err) => {
                warn!(%key, error = %err, "document could not be read; ignoring");
                None
            }
        }
    }

    /// Write a named document, logging and swallowing failures.
    pub fn write_doc<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(err) = self.write_json(&self.key_path(key), value) {
            warn!(%key, error = %err, "document write failed; nothing persisted");
        }
    }

    /// Remove a named document. Removing an absent key is a no-op.
    pub fn remove_doc(&self, key: &str) {
        let path = self.key_path(key);
        if !path.exists() {
            return;
        }
        if let Err(err) = fs::remove_file(&path) {
            warn!(%key, error = %err, "document removal failed");
        }
    }

    // =========================================================================
    // File I/O helpers (atomic writes for safety)
    // =========================================================================

    /// Write JSON atomically (write to temp, then rename) so readers
    /// never see a partial document.
    fn write_json<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        write_atomic(path, json.as_bytes())
    }
}

fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    let mut file = File::create(&temp_path)?;
    file.write_all(data)?;
    file.sync_all()?;

    fs::rename(&temp_path, path)?;

    Ok(())
}
