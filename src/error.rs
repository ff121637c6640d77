//! Error handling for validation runs.
//!
//! Validation defects are never errors: they become findings in a file's
//! report. The types here cover configuration and environment failures
//! plus the narrow, typed failures of the calendar and record parser.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidatorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Failed to open findings log {path}: {source}")]
    LogUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Worker task failed for file: {path} - {reason}")]
    WorkerFailed { path: PathBuf, reason: String },

    #[error("Report serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ValidatorError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ValidatorError>;

/// Calendar lookups that have no meaningful answer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("invalid month {month}: expected 1-12")]
    InvalidMonth { month: u32 },
}

/// Reasons a data line cannot be turned into a station record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("too few fields: found {found}, required at least {required}")]
    TooFewFields { found: usize, required: usize },

    #[error("year is not an integer: '{0}'")]
    InvalidYear(String),

    #[error("month is not an integer: '{0}'")]
    InvalidMonth(String),
}
