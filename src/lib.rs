//! Precipitation Station File Validator
//!
//! Checks fixed-format monthly precipitation station files against their
//! structural and temporal contract before any statistic is computed from
//! them.
//!
//! This library provides:
//! - Header checks against the fixed schema line and file-name station id
//! - Data line parsing with sentinel-aware day slots
//! - Year/month cadence tracking from a configurable epoch
//! - Sentinel placement checks against real month lengths, leap years included
//! - Per-file reports, an append-only findings log and a directory summary
//! - A bounded worker pool for large corpora

pub mod calendar;
pub mod cli;
pub mod config;
pub mod constants;
pub mod day_validity;
pub mod error;
pub mod header;
pub mod models;
pub mod processor;
pub mod record;
pub mod report;
pub mod sequence;

pub use config::ValidatorConfig;
pub use error::{Result, ValidatorError};
pub use models::{DirectorySummary, FileReport, FindingCategory, ValidationFinding};
pub use processor::{DirectoryValidator, ValidationRun};
