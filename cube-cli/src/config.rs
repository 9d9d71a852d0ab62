//! Configuration loading for cubetrack.
//!
//! Configuration is loaded from a TOML file, either the one named with
//! `--config` or `config.toml` in the platform config directory. Every field
//! has a default, so a partial file (or no file at all) is fine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use cubetrack_core::{TrackerConfig, DEFAULT_RESET_THRESHOLD};

/// Root configuration for cubetrack.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Scramble tracker configuration.
    #[serde(default)]
    pub tracker: TrackerSection,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Output configuration.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Scramble tracker configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerSection {
    /// Divergence depth that forces a cube reset (default: 10).
    #[serde(default = "default_reset_threshold")]
    pub reset_threshold: usize,
    /// Accept two quarter turns for an expected half turn (default: false).
    #[serde(default)]
    pub split_half_turns: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter used when `RUST_LOG` is unset (default: "info").
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Print JSON instead of text (default: false).
    #[serde(default)]
    pub json: bool,
}

fn default_reset_threshold() -> usize {
    DEFAULT_RESET_THRESHOLD
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for TrackerSection {
    fn default() -> Self {
        Self {
            reset_threshold: default_reset_threshold(),
            split_half_turns: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl TrackerSection {
    /// The tracker settings this section describes.
    pub fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig {
            reset_threshold: self.reset_threshold,
            split_half_turns: self.split_half_turns,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load the file named on the command line, or the default file.
    ///
    /// An explicit path must exist. A missing default file means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Render as TOML, in the layout `init-config` writes.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// `config.toml` in the platform config directory, if a home directory exists.
pub fn default_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("io", "cubetrack", "cubetrack")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Failed to parse configuration file.
    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: toml::de::Error,
    },
}
