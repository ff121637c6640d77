//! Configuration management and validation.
//!
//! Provides the file-format contract, the cadence epoch and year bounds,
//! and run settings such as the worker pool size and findings log path.

use crate::constants::{
    DATA_FILE_EXTENSION, DEFAULT_EPOCH_MONTH, DEFAULT_EPOCH_YEAR, DEFAULT_LOG_FILE,
    DEFAULT_MAX_YEAR, DEFAULT_MIN_YEAR, MIN_RECORD_FIELDS, RECORD_METADATA_FIELDS, SCHEMA_HEADER,
    SENTINEL_TOKENS, STATION_LINE_FIELDS,
};
use crate::error::{Result, ValidatorError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Expected (year, month) progression of data records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CadenceConfig {
    /// Year of the first data record
    pub epoch_year: i32,

    /// Month (1-12) of the first data record
    pub epoch_month: u32,

    /// Earliest acceptable record year
    pub min_year: i32,

    /// Latest acceptable record year
    pub max_year: i32,
}

impl Default for CadenceConfig {
    fn default() -> Self {
        Self {
            epoch_year: DEFAULT_EPOCH_YEAR,
            epoch_month: DEFAULT_EPOCH_MONTH,
            min_year: DEFAULT_MIN_YEAR,
            max_year: DEFAULT_MAX_YEAR,
        }
    }
}

impl CadenceConfig {
    /// Whether `year` lies within the configured bounds
    pub fn year_in_bounds(&self, year: i32) -> bool {
        (self.min_year..=self.max_year).contains(&year)
    }
}

/// Structural contract of a station file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFormatConfig {
    /// Exact content of line 1
    pub schema_header: String,

    /// Tab-delimited field count of line 2
    pub station_line_fields: usize,

    /// Minimum whitespace-delimited tokens on a data line
    pub min_record_fields: usize,

    /// Tokens treated as a missing daily value
    pub sentinel_tokens: Vec<String>,

    /// Expected file extension, without the dot
    pub data_extension: String,
}

impl Default for FileFormatConfig {
    fn default() -> Self {
        Self {
            schema_header: SCHEMA_HEADER.to_string(),
            station_line_fields: STATION_LINE_FIELDS,
            min_record_fields: MIN_RECORD_FIELDS,
            sentinel_tokens: SENTINEL_TOKENS.iter().map(|s| s.to_string()).collect(),
            data_extension: DATA_FILE_EXTENSION.to_string(),
        }
    }
}

impl FileFormatConfig {
    pub fn is_sentinel(&self, token: &str) -> bool {
        self.sentinel_tokens.iter().any(|s| s == token)
    }
}

/// Global configuration for a validation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Number of files validated concurrently
    pub workers: usize,

    /// Append-only findings log
    pub log_path: PathBuf,

    /// Show a progress bar while the pool runs
    pub show_progress: bool,

    /// Cadence epoch and year bounds
    pub cadence: CadenceConfig,

    /// File layout contract
    pub format: FileFormatConfig,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get().max(1),
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
            show_progress: true,
            cadence: CadenceConfig::default(),
            format: FileFormatConfig::default(),
        }
    }
}

impl ValidatorConfig {
    /// Create configuration with custom worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the findings log path
    pub fn with_log_path(mut self, log_path: impl Into<PathBuf>) -> Self {
        self.log_path = log_path.into();
        self
    }

    /// Set the (year, month) the first data record must carry
    pub fn with_epoch(mut self, year: i32, month: u32) -> Self {
        self.cadence.epoch_year = year;
        self.cadence.epoch_month = month;
        self
    }

    /// Set the acceptable record year range (inclusive)
    pub fn with_year_bounds(mut self, min_year: i32, max_year: i32) -> Self {
        self.cadence.min_year = min_year;
        self.cadence.max_year = max_year;
        self
    }

    /// Disable the progress bar
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Reject settings no validation run can work with
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(ValidatorError::configuration(
                "worker count must be at least 1",
            ));
        }

        let cadence = &self.cadence;
        if !(1..=12).contains(&cadence.epoch_month) {
            return Err(ValidatorError::configuration(format!(
                "epoch month {} is outside 1-12",
                cadence.epoch_month
            )));
        }
        if cadence.min_year > cadence.max_year {
            return Err(ValidatorError::configuration(format!(
                "minimum year {} is after maximum year {}",
                cadence.min_year, cadence.max_year
            )));
        }
        if !cadence.year_in_bounds(cadence.epoch_year) {
            return Err(ValidatorError::configuration(format!(
                "epoch year {} is outside the year bounds {}-{}",
                cadence.epoch_year, cadence.min_year, cadence.max_year
            )));
        }

        let format = &self.format;
        if format.sentinel_tokens.is_empty() {
            return Err(ValidatorError::configuration(
                "at least one sentinel token is required",
            ));
        }
        if format.min_record_fields <= RECORD_METADATA_FIELDS {
            return Err(ValidatorError::configuration(format!(
                "minimum record fields must exceed the {} metadata fields",
                RECORD_METADATA_FIELDS
            )));
        }
        if format.station_line_fields == 0 {
            return Err(ValidatorError::configuration(
                "station line field count must be at least 1",
            ));
        }

        debug!(
            "Configuration accepted: {} workers, epoch {}-{:02}, years {}-{}",
            self.workers,
            cadence.epoch_year,
            cadence.epoch_month,
            cadence.min_year,
            cadence.max_year
        );
        Ok(())
    }
}
