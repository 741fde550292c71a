//! Navigator settings persisted as TOML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::history::DEFAULT_MAX_HISTORY_LENGTH;
use crate::resolver::DEFAULT_STOP_PRELOAD_LIMIT;

/// Navigation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorSettings {
    pub history: HistorySettings,
    pub url: UrlSettings,
    pub cache: CacheSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum retained navigation events.
    pub max_length: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_HISTORY_LENGTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlSettings {
    /// Push a host history entry on every transition.
    pub mirror: bool,

    /// Path the query string is appended to.
    pub base_path: String,
}

impl Default for UrlSettings {
    fn default() -> Self {
        Self {
            mirror: true,
            base_path: "/".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Stops read by a preload.
    pub stop_preload_limit: usize,

    /// Preload names as soon as a feed is opened.
    pub preload_on_open: bool,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            stop_preload_limit: DEFAULT_STOP_PRELOAD_LIMIT,
            preload_on_open: true,
        }
    }
}

impl NavigatorSettings {
    /// Load settings from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from `path`, falling back to defaults on any error.
    pub fn load_from(path: &Path) -> Self {
        match Self::try_load_from(path) {
            Ok(settings) => settings,
            Err(error) => {
                tracing::debug!(%error, "using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from `path`, reporting missing or malformed files.
    pub fn try_load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            operation: "read",
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save settings to the default location.
    pub fn save(&self) -> Result<(), SettingsError> {
        self.save_to(&Self::config_path())
    }

    /// Save settings to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| SettingsError::Io {
                operation: "create directory for",
                path: path.to_path_buf(),
                source,
            })?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|source| SettingsError::Serialize { source })?;

        std::fs::write(path, content).map_err(|source| SettingsError::Io {
            operation: "write",
            path: path.to_path_buf(),
            source,
        })
    }

    /// Default settings file location.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "feednav", "feednav")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from("settings.toml"))
    }
}
