// Configuration loaded from an optional YAML file

use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{Level, debug};

pub const DEFAULT_DATA_FILE: &str = "employees.jsonl";

/// Runtime settings
///
/// Every key is optional in the file; missing keys take the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Employee file, relative paths resolve against the working directory
    pub data_file: PathBuf,
    /// One of trace, debug, info, warn, error
    pub log_level: String,
    /// Colored terminal output
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_level: "warn".to_string(),
            color: true,
        }
    }
}

impl Config {
    /// Load configuration
    ///
    /// An explicit path must exist. Without one, the per-user config file is
    /// used when present, otherwise the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// `<config dir>/emprecord/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("emprecord").join("config.yaml"))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml(&content).with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!(file = ?path, "Loaded configuration");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content).context("Failed to parse YAML")?;
        config.level()?;
        Ok(config)
    }

    /// Parsed `log_level`
    pub fn level(&self) -> Result<Level> {
        self.log_level
            .parse()
            .map_err(|_| eyre!("Unknown log level: {}", self.log_level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.data_file, PathBuf::from("employees.jsonl"));
        assert_eq!(config.level().unwrap(), Level::WARN);
        assert!(config.color);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("data_file: /var/lib/hr/staff.jsonl\n").unwrap();
        assert_eq!(config.data_file, PathBuf::from("/var/lib/hr/staff.jsonl"));
        assert_eq!(config.log_level, "warn");
        assert!(config.color);
    }

    #[test]
    fn test_full_yaml() {
        let yaml = "data_file: staff.jsonl\nlog_level: debug\ncolor: false\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.level().unwrap(), Level::DEBUG);
        assert!(!config.color);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    }

    #[test]
    fn test_bad_log_level_rejected() {
        assert!(Config::from_yaml("log_level: loud\n").is_err());
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let temp = TempDir::new().unwrap();
        assert!(Config::load(Some(&temp.path().join("missing.yaml"))).is_err());

        let path = temp.path().join("config.yaml");
        fs::write(&path, "color: false\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert!(!config.color);
    }
}
