// src/error.rs
use std::io;

use thiserror::Error;

/// Failures raised by the scheduling core.
///
/// Interrupting a session is not in here: that is the driver's `Terminated`
/// state, not an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LearnError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid status value {0}, must be one of {{-1, 0, 1}}")]
    InvalidStatus(i64),

    #[error("streak underflow for {word} ({kind}): {value}")]
    StreakUnderflow { word: String, kind: String, value: i64 },

    #[error("group {group} is out of range ({groups} groups available)")]
    OutOfRangeGroup { group: usize, groups: usize },
}

/// Dictionary lookups. `NotFound` is the expected miss and never aborts a batch.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("no dictionary entry for '{0}'")]
    NotFound(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("could not read dictionary payload: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<reqwest::Error> for LookupError {
    fn from(error: reqwest::Error) -> Self {
        LookupError::Http(error.to_string())
    }
}

/// Table load/save.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{path}: missing column '{column}'")]
    MissingColumn { path: String, column: String },

    #[error("{path} line {line}: bad value '{value}' in column '{column}'")]
    BadValue { path: String, line: usize, column: String, value: String },

    #[error("config {path}: {source}")]
    Config { path: String, source: serde_json::Error },

    #[error(transparent)]
    Learn(#[from] LearnError),
}

/// Why a session stopped early. A user cancel is not one of these.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Learn(#[from] LearnError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}
