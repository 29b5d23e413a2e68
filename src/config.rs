//! Application settings loaded from a TOML file
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::Level;
use url::Url;

use crate::api::FetcherConfig;
use crate::error::ConfigError;

const APP_DIR: &str = "avatar-dash";

/// Remote source settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Endpoint returning the paged user list
    pub base_url: Url,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        let fetcher = FetcherConfig::default();
        Self {
            base_url: fetcher.base_url,
            timeout_secs: fetcher.timeout.as_secs(),
            user_agent: fetcher.user_agent,
        }
    }
}

/// Interface settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Name used in the greeting
    pub user_name: String,
    /// Redraw interval in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self { user_name: "friend".to_string(), tick_rate_ms: 100 }
    }
}

impl UiSettings {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }
}

/// Log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Maximum level written to the log file
    pub level: LogLevel,
    /// Directory for log files; defaults to the user cache directory
    pub dir: Option<PathBuf>,
}

impl LogSettings {
    /// Directory logs are written to
    pub fn dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join(APP_DIR)
                .join("logs")
        })
    }
}

/// All settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub ui: UiSettings,
    pub log: LogSettings,
}

impl Settings {
    /// Default location of the settings file
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.toml")
    }

    /// Parse settings from TOML text
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load settings from a file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io { path: path.to_path_buf(), source }),
        }
    }

    /// Replace the endpoint with a URL given on the command line
    pub fn override_base_url(&mut self, url: &str) -> Result<(), ConfigError> {
        self.api.base_url = Url::parse(url)?;
        Ok(())
    }

    /// Fetcher configuration derived from these settings
    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig {
            base_url: self.api.base_url.clone(),
            timeout: Duration::from_secs(self.api.timeout_secs),
            user_agent: self.api.user_agent.clone(),
        }
    }
}
