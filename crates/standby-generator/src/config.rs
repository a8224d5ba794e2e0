//! Standby replication configuration
//!
//! Loaded from TOML or YAML files, or from a flat job config map using the
//! `job.standbytasks.replication.factor` key.

use crate::generator::ReplicationFactor;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Job config key holding the replication factor
pub const REPLICATION_FACTOR_KEY: &str = "job.standbytasks.replication.factor";

/// Replication factor used when none is configured
pub const DEFAULT_REPLICATION_FACTOR: i32 = 1;

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// File extension is not a known config format
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(PathBuf),

    /// TOML parse error
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML parse error
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Job config value is not a valid integer
    #[error("invalid value for {key}: {value}")]
    InvalidValue {
        /// Config key
        key: String,
        /// Rejected value
        value: String,
    },

    /// Replication factor below 1
    #[error("replication factor must be at least 1, got {0}")]
    InvalidReplicationFactor(i32),
}

/// Standby replication settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct StandbyConfig {
    /// Total copies of every task (1 = no standbys)
    pub replication_factor: i32,
}

impl StandbyConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With replication factor
    #[inline]
    #[must_use]
    pub fn with_replication_factor(mut self, replication_factor: i32) -> Self {
        self.replication_factor = replication_factor;
        self
    }

    /// Check if standby tasks are requested
    #[inline]
    #[must_use]
    pub fn standby_tasks_enabled(&self) -> bool {
        self.replication_factor > 1
    }

    /// Validate and return the replication factor
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidReplicationFactor`] if the factor is below 1
    pub fn validate(&self) -> Result<ReplicationFactor, ConfigError> {
        ReplicationFactor::try_from(self.replication_factor)
            .map_err(|_| ConfigError::InvalidReplicationFactor(self.replication_factor))
    }

    /// Parse and validate TOML
    ///
    /// # Errors
    /// Returns error on malformed TOML or an invalid factor
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate YAML
    ///
    /// # Errors
    /// Returns error on malformed YAML or an invalid factor
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.toml`, `.yaml` or `.yml` file
    ///
    /// # Errors
    /// Returns error if the file cannot be read, has an unknown extension,
    /// or does not parse and validate
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&contents),
            Some("yaml" | "yml") => Self::from_yaml_str(&contents),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Read from a flat job config map
    ///
    /// A missing key yields the default factor.
    ///
    /// # Errors
    /// Returns error if the value is not an integer or is below 1
    pub fn from_job_config(job_config: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let replication_factor = match job_config.get(REPLICATION_FACTOR_KEY) {
            None => DEFAULT_REPLICATION_FACTOR,
            Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: REPLICATION_FACTOR_KEY.to_string(),
                value: value.clone(),
            })?,
        };

        let config = Self { replication_factor };
        config.validate()?;
        Ok(config)
    }
}

impl Default for StandbyConfig {
    fn default() -> Self {
        Self {
            replication_factor: DEFAULT_REPLICATION_FACTOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_has_no_standbys() {
        let config = StandbyConfig::new();
        assert_eq!(config.replication_factor, 1);
        assert!(!config.standby_tasks_enabled());
        assert_eq!(config.validate().unwrap(), ReplicationFactor::NONE);
    }

    #[test]
    fn builder() {
        let config = StandbyConfig::new().with_replication_factor(3);
        assert!(config.standby_tasks_enabled());
        assert_eq!(config.validate().unwrap().get(), 3);
    }

    #[test]
    fn toml_parsing() {
        let config = StandbyConfig::from_toml_str("replication-factor = 2").unwrap();
        assert_eq!(config.replication_factor, 2);

        let config = StandbyConfig::from_toml_str("").unwrap();
        assert_eq!(config, StandbyConfig::default());
    }

    #[test]
    fn toml_rejects_zero_factor() {
        let err = StandbyConfig::from_toml_str("replication-factor = 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidReplicationFactor(0)));
    }

    #[test]
    fn yaml_parsing() {
        let config = StandbyConfig::from_yaml_str("replication-factor: 4\n").unwrap();
        assert_eq!(config.replication_factor, 4);

        let err = StandbyConfig::from_yaml_str("replication-factor: -1\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidReplicationFactor(-1)));
    }

    #[test]
    fn job_config_key() {
        let mut job = HashMap::new();
        assert_eq!(StandbyConfig::from_job_config(&job).unwrap().replication_factor, 1);

        job.insert(REPLICATION_FACTOR_KEY.to_string(), " 3 ".to_string());
        assert_eq!(StandbyConfig::from_job_config(&job).unwrap().replication_factor, 3);

        job.insert(REPLICATION_FACTOR_KEY.to_string(), "three".to_string());
        assert!(matches!(
            StandbyConfig::from_job_config(&job).unwrap_err(),
            ConfigError::InvalidValue { .. }
        ));

        job.insert(REPLICATION_FACTOR_KEY.to_string(), "0".to_string());
        assert!(matches!(
            StandbyConfig::from_job_config(&job).unwrap_err(),
            ConfigError::InvalidReplicationFactor(0)
        ));
    }

    #[test]
    fn from_path_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("standby.toml");
        std::fs::File::create(&toml_path)
            .unwrap()
            .write_all(b"replication-factor = 2\n")
            .unwrap();
        assert_eq!(StandbyConfig::from_path(&toml_path).unwrap().replication_factor, 2);

        let yml_path = dir.path().join("standby.yml");
        std::fs::write(&yml_path, "replication-factor: 3\n").unwrap();
        assert_eq!(StandbyConfig::from_path(&yml_path).unwrap().replication_factor, 3);

        let ini_path = dir.path().join("standby.ini");
        std::fs::write(&ini_path, "replication-factor=2").unwrap();
        assert!(matches!(
            StandbyConfig::from_path(&ini_path).unwrap_err(),
            ConfigError::UnsupportedFormat(_)
        ));

        assert!(matches!(
            StandbyConfig::from_path(dir.path().join("missing.toml")).unwrap_err(),
            ConfigError::Io { .. }
        ));
    }
}
