//! Runtime configuration for a dashboard instance.
//!
//! # Responsibility
//! - Describe where goals are stored and how logging is set up.
//! - Load that description from JSON with per-field defaults.
//!
//! # Invariants
//! - Every field has a default, so `{}` is a valid config.
//! - `log_level` must be one of `trace|debug|info|warn|error`.

use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

const SUPPORTED_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config json: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Dashboard settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// SQLite file for the local store. `None` keeps goals in memory.
    pub db_path: Option<PathBuf>,
    pub log_level: String,
    /// Absolute log directory. `None` leaves logging uninitialized.
    pub log_dir: Option<PathBuf>,
    /// Simulated read latency of the remote stand-in.
    pub remote_latency_ms: u64,
    /// Pre-fill the remote stand-in with demo goals.
    pub seed_remote: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
            remote_latency_ms: 0,
            seed_remote: false,
        }
    }
}

impl DashboardConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.log_level.trim().to_ascii_lowercase();
        if !SUPPORTED_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "unsupported log_level `{}`",
                self.log_level
            )));
        }
        if let Some(dir) = &self.log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "log_dir must be an absolute path, got `{}`",
                    dir.display()
                )));
            }
        }
        Ok(())
    }

    pub fn remote_latency(&self) -> Duration {
        Duration::from_millis(self.remote_latency_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DashboardConfig};
    use std::time::Duration;

    #[test]
    fn empty_object_uses_defaults() {
        let config = DashboardConfig::from_json_str("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.remote_latency(), Duration::ZERO);
    }

    #[test]
    fn fields_override_defaults() {
        let config = DashboardConfig::from_json_str(
            r#"{"db_path": "/tmp/goals.db", "log_level": "WARN", "remote_latency_ms": 2000, "seed_remote": true}"#,
        )
        .unwrap();
        assert_eq!(config.db_path.as_deref().and_then(|p| p.to_str()), Some("/tmp/goals.db"));
        assert_eq!(config.remote_latency(), Duration::from_millis(2000));
        assert!(config.seed_remote);
    }

    #[test]
    fn rejects_unknown_level_and_relative_log_dir() {
        let level = DashboardConfig::from_json_str(r#"{"log_level": "loud"}"#).unwrap_err();
        assert!(matches!(level, ConfigError::Invalid(_)));

        let dir = DashboardConfig::from_json_str(r#"{"log_dir": "logs"}"#).unwrap_err();
        assert!(dir.to_string().contains("absolute"));
    }
}
