use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::i18n::Language;
use crate::models::Role;
use crate::table::DEFAULT_PAGE_SIZE;

/// Overrides the settings directory; used by tests and portable installs.
pub const CONFIG_DIR_ENV: &str = "TESOURARIA_CONFIG_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub language: Language,
    /// Role picked at the login screen by default; `None` shows the picker.
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: Language::default(),
            role: None,
            page_size: default_page_size(),
        }
    }
}

impl Settings {
    pub fn with_page_size(mut self, page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(AppError::Settings("page size must be at least 1".into()));
        }
        self.page_size = page_size;
        Ok(self)
    }
}

fn config_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("tesouraria")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

/// Missing or unreadable files yield defaults; a bad page size is reset.
pub fn load_settings_from(path: &Path) -> Settings {
    if !path.exists() {
        return Settings::default();
    }
    let content = std::fs::read_to_string(path).unwrap_or_default();
    let mut settings: Settings = serde_json::from_str(&content).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
        Settings::default()
    });
    if settings.page_size == 0 {
        settings.page_size = default_page_size();
    }
    settings
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    save_settings_to(&settings_path(), settings)
}

pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, format!("{json}\n"))?;
    tracing::debug!(path = %path.display(), "settings saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep").join("settings.json");
        let settings = Settings {
            language: Language::Pt,
            role: Some(Role::ClientAdmin),
            page_size: 25,
        };
        save_settings_to(&path, &settings).unwrap();
        assert_eq!(load_settings_from(&path), settings);
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"client-admin\""));
    }

    #[test]
    fn test_load_returns_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let s = load_settings_from(&dir.path().join("nope.json"));
        assert_eq!(s, Settings::default());
        assert_eq!(s.page_size, 10);
    }

    #[test]
    fn test_load_merges_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"language": "pt"}"#).unwrap();
        let s = load_settings_from(&path);
        assert_eq!(s.language, Language::Pt);
        assert_eq!(s.role, None);
        assert_eq!(s.page_size, 10);
    }

    #[test]
    fn test_garbage_and_zero_page_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(load_settings_from(&path), Settings::default());
        std::fs::write(&path, r#"{"page_size": 0}"#).unwrap();
        assert_eq!(load_settings_from(&path).page_size, 10);
        assert!(Settings::default().with_page_size(0).is_err());
    }
}
