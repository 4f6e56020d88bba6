//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file with environment variable
//! overrides for deployment-specific values like the database location.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    ///
    /// Diagnostics go to stderr; stdout is reserved for command output.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
            _ => {
                fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "pretty".into(),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Location of the SQLite database file. When unset, the file under
    /// the application home directory is used.
    pub database_path: Option<PathBuf>,
}

/// Main application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let mut config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Load the file at `path` if it exists, otherwise fall back to
    /// defaults. Every setting has a default, so a fresh machine works
    /// without any configuration file.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            return Self::load(path);
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Process environment beats the file for settings that vary by
    /// deployment. `dotenvy` has already folded any `.env` file into the
    /// process environment by the time this runs.
    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("PLATEFUL_DATABASE_PATH") {
            if !path.is_empty() {
                self.storage.database_path = Some(PathBuf::from(path));
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.logging.level.is_empty() {
            return Err(ConfigError::MissingField {
                field: "logging.level",
            }
            .into());
        }

        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "logging.format",
                    reason: format!("expected \"pretty\" or \"json\", got \"{other}\""),
                }
                .into())
            }
        }

        Ok(())
    }

    /// Initialize the tracing subscriber from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
