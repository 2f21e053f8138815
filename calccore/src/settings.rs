//! Persisted calculator settings
//!
//! A flat JSON document with three keys: `language`, `theme` and
//! `precision`. Loading never fails; anything missing or malformed falls
//! back to the defaults so the calculator always starts.

use crate::i18n::Language;
use crate::storage::{self, Result};
use crate::theme::ThemeName;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Number of fractional digits kept when formatting results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Precision(u32);

impl Precision {
    /// The values offered in the settings window.
    pub const CHOICES: [Precision; 4] = [Precision(2), Precision(5), Precision(10), Precision(15)];

    pub fn digits(self) -> usize {
        self.0 as usize
    }
}

impl Default for Precision {
    fn default() -> Self {
        Precision(10)
    }
}

impl TryFrom<u32> for Precision {
    type Error = String;

    fn try_from(value: u32) -> std::result::Result<Self, Self::Error> {
        Self::CHOICES
            .iter()
            .copied()
            .find(|p| p.0 == value)
            .ok_or_else(|| format!("unsupported precision {value}, expected one of 2, 5, 10, 15"))
    }
}

impl From<Precision> for u32 {
    fn from(p: Precision) -> u32 {
        p.0
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Settings that are persisted between runs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub language: Language,
    pub theme: ThemeName,
    pub precision: Precision,
}

impl Settings {
    /// Default location, see [`storage::settings_path`].
    pub fn default_path() -> PathBuf {
        storage::settings_path()
    }

    /// Load settings from `path`, falling back to defaults.
    ///
    /// Keys absent from the document keep their default value.
    pub fn load(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                return Self::default();
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable settings, using defaults");
                return Self::default();
            }
        };
        match serde_json::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "invalid settings, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, contents)?;
        tracing::debug!(path = %path.display(), "settings saved");
        Ok(())
    }
}
