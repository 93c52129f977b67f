//! Session configuration.
//!
//! `SessionConfig` holds the settings the host exposes to the user: whether
//! tracking is enabled and where stat files are stored. It is plain data,
//! loaded from JSON; missing fields take their defaults.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of stat files, relative to the host's data root.
pub const DEFAULT_DATA_DIRECTORY: &str = "data/CustomTrainingStatistics";

/// Settings for a `TrainingSession`.
///
/// # Examples
///
/// ```rust
/// use shotstat::SessionConfig;
///
/// let config = SessionConfig::from_json_str(r#"{ "enabled": false }"#).unwrap();
/// assert!(!config.enabled);
/// assert_eq!(
///     config.data_directory.to_str(),
///     Some("data/CustomTrainingStatistics")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Whether training events are processed at all.
    pub enabled: bool,

    /// Directory holding one sub-directory of stat files per training pack.
    pub data_directory: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            data_directory: PathBuf::from(DEFAULT_DATA_DIRECTORY),
        }
    }
}

impl SessionConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Serialize the configuration as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
