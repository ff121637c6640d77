//! Findings log writer
//!
//! The log is append-only and has a single owner: one task receives every
//! completed [`FileReport`] over a channel, appends its findings as
//! timestamped lines, flushes, and folds the report into the running
//! [`DirectorySummary`]. Reports already written survive a later failure.

use crate::constants::LOG_TIMESTAMP_FORMAT;
use crate::error::{Result, ValidatorError};
use crate::models::{DirectorySummary, FileReport};

use chrono::Local;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Append-only, timestamped findings log
#[derive(Debug)]
pub struct FindingLog {
    path: PathBuf,
    writer: BufWriter<tokio::fs::File>,
}

impl FindingLog {
    /// Open (or create) the log for appending
    pub async fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(|source| ValidatorError::LogUnavailable {
                path: path.to_path_buf(),
                source,
            })?;

        debug!("Findings log opened: {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append every finding of `report`, returning the number of lines written
    pub async fn write_report(&mut self, report: &FileReport) -> Result<usize> {
        let lines = report_lines(report);
        for line in &lines {
            self.append(line).await?;
        }
        self.writer.flush().await?;
        Ok(lines.len())
    }

    /// Append a single free-form message
    pub async fn write_message(&mut self, message: &str) -> Result<()> {
        self.append(message).await?;
        self.writer.flush().await?;
        Ok(())
    }

    async fn append(&mut self, message: &str) -> Result<()> {
        let timestamp = Local::now().format(LOG_TIMESTAMP_FORMAT).to_string();
        let line = format_log_line(&timestamp, message);
        self.writer.write_all(line.as_bytes()).await?;
        Ok(())
    }
}

/// `YYYY-MM-DD HH:MM:SS: message` plus newline
pub fn format_log_line(timestamp: &str, message: &str) -> String {
    format!("{}: {}\n", timestamp, message)
}

/// Log messages for each finding of a report, without timestamps
pub fn report_lines(report: &FileReport) -> Vec<String> {
    let file_name = report.file_name();
    report
        .findings
        .iter()
        .map(|finding| format!("ERROR: {} {}", file_name, finding))
        .collect()
}

/// What the log writer task hands back once the channel closes
#[derive(Debug, Default)]
pub struct LogOutcome {
    pub reports: Vec<FileReport>,
    pub summary: DirectorySummary,
    pub lines_written: usize,
    pub write_failures: usize,
}

/// Spawn the single writer that owns the log and the summary accumulator
pub fn spawn_log_writer(
    mut log: FindingLog,
    mut receiver: mpsc::Receiver<FileReport>,
) -> JoinHandle<LogOutcome> {
    tokio::spawn(async move {
        let mut outcome = LogOutcome::default();

        while let Some(report) = receiver.recv().await {
            match log.write_report(&report).await {
                Ok(lines) => outcome.lines_written += lines,
                Err(e) => {
                    outcome.write_failures += 1;
                    warn!(
                        "Failed to append findings for {} to {}: {}",
                        report.path.display(),
                        log.path().display(),
                        e
                    );
                }
            }
            outcome.summary.add(&report);
            outcome.reports.push(report);
        }

        outcome
    })
}
