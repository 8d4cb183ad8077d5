//! User preferences for ctui
//!
//! Located at `~/.config/ctui/config.toml`

use crate::{ConfigError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the audit log file inside the data directory
pub const AUDIT_LOG_FILE: &str = "command.log";

/// Persisted user preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Build file name the file picker looks for first
    pub default_build_file: String,
    /// Require typing the resource name before irreversible actions
    pub confirm_destructive_actions: bool,
    /// Color theme ("auto", "dark" or "light")
    pub theme_mode: String,
    /// Periodically re-fetch lists while a list screen is idle
    pub refresh_on_focus: bool,
    /// Days of command audit history to keep (0 keeps everything)
    pub log_retention_days: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            default_build_file: "Containerfile".to_string(),
            confirm_destructive_actions: true,
            theme_mode: "auto".to_string(),
            refresh_on_focus: false,
            log_retention_days: 7,
        }
    }
}

/// Resolved color theme mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Auto,
    Dark,
    Light,
}

impl std::str::FromStr for ThemeMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" | "" => Ok(Self::Auto),
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(ConfigError::Invalid(format!("unknown theme mode: {}", other))),
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Dark => write!(f, "dark"),
            Self::Light => write!(f, "light"),
        }
    }
}

impl Preferences {
    /// Load preferences from the default path
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load preferences from a specific path, falling back to defaults when absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let prefs: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::debug!(
            "Loaded config from {:?}: theme={}, retention_days={}",
            path,
            prefs.theme_mode,
            prefs.log_retention_days
        );

        Ok(prefs)
    }

    /// Save preferences to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Resolved theme mode; unknown values fall back to `auto`
    pub fn theme(&self) -> ThemeMode {
        match self.theme_mode.parse() {
            Ok(mode) => mode,
            Err(e) => {
                tracing::warn!("{}, using auto", e);
                ThemeMode::Auto
            }
        }
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "ctui").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "ctui").ok_or(ConfigError::NoDataDir)?;
        Ok(dirs.data_dir().to_path_buf())
    }

    /// Path of the command audit log
    pub fn audit_log_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join(AUDIT_LOG_FILE))
    }
}
