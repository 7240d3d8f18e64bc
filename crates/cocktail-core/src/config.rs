use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::format::{FormatOptions, ViewMode};
use super::platform;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Initial panel view: `ingredients`, `recipe` or `image`.
    #[serde(default)]
    pub view: ViewMode,
    /// Upper-case recipe text.
    #[serde(default)]
    pub uppercase: bool,
    #[serde(default = "default_show_keys_bar")]
    pub show_keys_bar: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` wins when set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            view: ViewMode::default(),
            uppercase: false,
            show_keys_bar: default_show_keys_bar(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_show_keys_bar() -> bool {
    true
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl DisplayConfig {
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            view: self.view,
            uppercase: self.uppercase,
        }
    }
}

impl Config {
    /// Load the user config. A missing file yields the defaults; the file is
    /// never created.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}
