//! Error types.
//!
//! Reading a stat file either yields complete data or one of the
//! `StatFileError` variants; there is no partial result. Configuration
//! loading failures are reported through `ConfigError`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a stat file.
///
/// Line numbers are 1-based and refer to the line that violated the
/// format.
///
/// # Examples
///
/// ```rust
/// use shotstat::StatFileError;
///
/// let err = StatFileError::UnsupportedVersion("0.9".to_string());
/// assert_eq!(err.to_string(), "Unsupported stat file version: 0.9");
/// ```
#[derive(Debug, Error)]
pub enum StatFileError {
    /// The file could not be opened or read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file ended before the expected line.
    #[error("Unexpected end of file at line {0}")]
    UnexpectedEof(usize),

    /// A `key<TAB>value` line had no tab.
    #[error("Missing tab delimiter at line {0}")]
    MissingDelimiter(usize),

    /// A line carried a different key than required at this position.
    #[error("Unexpected tag at line {line}: expected '{expected}', found '{found}'")]
    UnexpectedTag {
        line: usize,
        expected: &'static str,
        found: String,
    },

    /// The version line named a version this reader does not know.
    #[error("Unsupported stat file version: {0}")]
    UnsupportedVersion(String),

    /// A value could not be parsed as a number.
    #[error("Invalid number at line {line}: '{value}'")]
    InvalidNumber { line: usize, value: String },

    /// A value that must be non-negative was negative.
    #[error("Negative value at line {line}: {value}")]
    NegativeValue { line: usize, value: String },

    /// The header announced zero shots.
    #[error("Number of shots must be positive, found {0}")]
    InvalidShotCount(u32),

    /// Any other structural violation.
    #[error("Malformed line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// Errors that can occur while loading a `SessionConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration was not valid JSON for `SessionConfig`.
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
