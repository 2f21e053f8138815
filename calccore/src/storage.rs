//! Storage utilities for Calculator Plus
//!
//! Resolves where settings live and wraps the errors that reading and
//! writing them can produce.

use std::path::PathBuf;
use thiserror::Error;

/// Environment variable that overrides the settings file location.
pub const SETTINGS_ENV: &str = "CALCPLUS_SETTINGS";

const SETTINGS_FILE: &str = "settings.json";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Get the config directory for an app
pub fn config_dir(app_name: &str) -> PathBuf {
    directories::ProjectDirs::from("org", "calcplus", app_name)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Path of the settings document.
///
/// `CALCPLUS_SETTINGS` wins when set and non-empty, otherwise the file sits
/// in the per-user config directory.
pub fn settings_path() -> PathBuf {
    settings_path_from(std::env::var(SETTINGS_ENV).ok())
}

/// [`settings_path`] with the override value passed in.
pub fn settings_path_from(env_override: Option<String>) -> PathBuf {
    match env_override {
        Some(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => config_dir("calcplus").join(SETTINGS_FILE),
    }
}

/// Directory searched for translation overrides (`<language>.json`).
pub fn locale_dir() -> PathBuf {
    config_dir("calcplus").join("locale")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_names_app() {
        let dir = config_dir("calcplus");
        assert!(dir.to_string_lossy().contains("calcplus") || dir == PathBuf::from("."));
    }

    #[test]
    fn test_settings_path_override() {
        assert_eq!(
            settings_path_from(Some("/tmp/calc/settings.json".to_string())),
            PathBuf::from("/tmp/calc/settings.json")
        );
    }

    #[test]
    fn test_settings_path_blank_override_falls_back() {
        let default = config_dir("calcplus").join(SETTINGS_FILE);
        assert_eq!(settings_path_from(None), default);
        assert_eq!(settings_path_from(Some(String::new())), default);
        assert_eq!(settings_path_from(Some("   ".to_string())), default);
    }

    #[test]
    fn test_storage_error_display() {
        let err: StorageError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(err.to_string().starts_with("JSON error"));
    }
}
