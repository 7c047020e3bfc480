//! TOML-based application configuration.
//!
//! Stores the default work and break durations offered by the host.
//! Configuration lives at `<data_dir>/config.toml`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Upper bound for a work countdown, in minutes.
pub const WORK_MINUTES_MAX: u32 = 240;
/// Upper bound for a break countdown, in minutes.
pub const BREAK_MINUTES_MAX: u32 = 60;
/// Upper bound for a manually entered session, in minutes.
pub const MANUAL_MINUTES_MAX: u32 = 600;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Default work duration offered when starting a session.
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,
    /// Default break duration offered after a completed session.
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
}

fn default_work_minutes() -> u32 {
    25
}
fn default_break_minutes() -> u32 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            break_minutes: default_break_minutes(),
        }
    }
}

impl Config {
    /// Load from `path`, or write and return the defaults when the file is
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed, or if the
    /// defaults cannot be written.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|err| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: err.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to `path`.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|err| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        std::fs::write(path, content).map_err(|err| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Load from `path`, returning defaults on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.work_minutes, 25);
        assert_eq!(parsed.break_minutes, 5);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("work_minutes = 50\n").unwrap();
        assert_eq!(parsed.work_minutes, 50);
        assert_eq!(parsed.break_minutes, 5);
    }

    #[test]
    fn load_writes_defaults_when_absent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
        assert_eq!(Config::load(&path).unwrap(), cfg);
    }

    #[test]
    fn unparsable_file_is_a_load_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "work_minutes = \"soon\"").unwrap();
        assert!(Config::load(&path).is_err());
        assert_eq!(Config::load_or_default(&path), Config::default());
    }
}
