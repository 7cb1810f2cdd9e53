//! Configuration management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure.
///
/// Every field has a default, so the daemon runs without a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory where the `w1` driver exposes sensors
    #[serde(default = "default_device_dir")]
    pub device_dir: PathBuf,

    /// Metrics server listen address (e.g., "0.0.0.0:8080")
    #[serde(default = "default_listen")]
    pub listen: String,

    /// PID file written in daemon mode
    #[serde(default = "default_pid_file")]
    pub pid_file: PathBuf,

    /// Log file stdout and stderr are redirected to in daemon mode
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

// Default value functions
fn default_device_dir() -> PathBuf {
    PathBuf::from(freezermon_w1::DEVICE_DIR)
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_pid_file() -> PathBuf {
    PathBuf::from("/tmp/freezermon.pid")
}

fn default_log_file() -> PathBuf {
    PathBuf::from("/tmp/freezermon.log")
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read configuration file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse configuration")?;
        Ok(config)
    }

    /// Loads `path` if given, otherwise returns the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device_dir: default_device_dir(),
            listen: default_listen(),
            pid_file: default_pid_file(),
            log_file: default_log_file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.device_dir, PathBuf::from("/sys/bus/w1/devices"));
        assert_eq!(config.listen, "0.0.0.0:8080");
        assert_eq!(config.pid_file, PathBuf::from("/tmp/freezermon.pid"));
        assert_eq!(config.log_file, PathBuf::from("/tmp/freezermon.log"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "listen = \"127.0.0.1:9100\"\n").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.listen, "127.0.0.1:9100");
        assert_eq!(config.device_dir, default_device_dir());
    }

    #[test]
    fn test_load_or_default() {
        assert_eq!(Config::load_or_default(None).unwrap(), Config::default());
        assert!(Config::load_or_default(Some(Path::new("/nonexistent/freezermon.toml"))).is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "listen = [").unwrap();
        assert!(Config::load(file.path()).is_err());
    }
}
