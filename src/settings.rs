//! Persisted user preferences.
//!
//! Stored as the `userSettings` document, shared across partitions.
//! Missing fields deserialize to the same defaults a missing document
//! gets, so partially written settings never reset everything.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::store::{Store, KEY_SETTINGS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    System,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::System
    }
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            other => Err(Error::InvalidArgument(format!(
                "unknown theme '{other}' (expected light, dark, or system)"
            ))),
        }
    }
}

/// Preferences persisted in the `userSettings` document.
///
/// `auto_save` is data only: persistence stays write-through either
/// way, and the flag records the user's choice for surfaces that want
/// to honor it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    #[serde(default = "default_auto_save")]
    pub auto_save: bool,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_notifications")]
    pub notifications: bool,
    #[serde(default)]
    pub email_notifications: bool,
}

fn default_auto_save() -> bool {
    true
}

fn default_notifications() -> bool {
    true
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            auto_save: default_auto_save(),
            theme: Theme::default(),
            notifications: default_notifications(),
            email_notifications: false,
        }
    }
}

impl UserSettings {
    /// Read the settings document, or defaults when absent.
    pub fn load(store: &Store) -> Self {
        store.read_doc(KEY_SETTINGS).unwrap_or_default()
    }

    pub fn save(&self, store: &Store) {
        store.write_doc(KEY_SETTINGS, self);
    }
}
