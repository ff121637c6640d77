//! Directory validation engine.
//!
//! Orchestrates a validation run: file discovery, a bounded pool of
//! per-file validators, and the single findings-log writer that builds the
//! directory summary from completed reports.

pub mod discovery;
pub mod file_validator;
pub mod writer;

#[cfg(test)]
pub mod tests;

use self::discovery::FileDiscovery;
use self::file_validator::{has_extension, validate_file};
use self::writer::{FindingLog, spawn_log_writer};

use crate::config::ValidatorConfig;
use crate::error::{Result, ValidatorError};
use crate::models::{DirectorySummary, FileReport, FindingCategory, ValidationFinding};

use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task;
use tracing::{debug, error, info, warn};

/// Result of validating one directory
#[derive(Debug, Serialize)]
pub struct ValidationRun {
    pub directory: PathBuf,
    pub log_path: PathBuf,
    pub summary: DirectorySummary,
    /// Reports sorted by path, independent of worker scheduling
    pub reports: Vec<FileReport>,
    pub processing_time_ms: u128,
}

impl ValidationRun {
    pub fn all_valid(&self) -> bool {
        self.summary.all_valid()
    }

    pub fn invalid_reports(&self) -> impl Iterator<Item = &FileReport> {
        self.reports.iter().filter(|r| !r.valid)
    }
}

/// Validator for a directory of station files
#[derive(Debug)]
pub struct DirectoryValidator {
    directory: PathBuf,
    config: Arc<ValidatorConfig>,
}

impl DirectoryValidator {
    /// Create a validator, rejecting unusable configuration up front
    pub fn new(directory: PathBuf, config: ValidatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            directory,
            config: Arc::new(config),
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Main validation entry point
    ///
    /// Only an unopenable findings log is fatal. A directory that cannot be
    /// listed is logged once and yields an empty run.
    pub async fn run(&self) -> Result<ValidationRun> {
        let start_time = Instant::now();
        info!("Validating station files in {}", self.directory.display());

        let mut log = FindingLog::open(&self.config.log_path).await?;

        let mut discovery = FileDiscovery::new(self.directory.clone());
        let files = match discovery
            .discover_files(&self.config.format.data_extension)
            .await
        {
            Ok(files) => {
                if files.is_empty() {
                    let message = format!("ERROR: no files found in {}", self.directory.display());
                    if let Err(log_err) = log.write_message(&message).await {
                        warn!("Failed to record empty directory in findings log: {}", log_err);
                    }
                }
                files
            }
            Err(e) => {
                error!("Cannot list directory {}: {}", self.directory.display(), e);
                let message = format!(
                    "ERROR: cannot list directory {}: {}",
                    self.directory.display(),
                    e
                );
                if let Err(log_err) = log.write_message(&message).await {
                    warn!("Failed to record directory error in findings log: {}", log_err);
                }
                Vec::new()
            }
        };

        if files.is_empty() {
            warn!("No station files found in {}", self.directory.display());
        } else if discovery.non_data_count() > 0 {
            warn!(
                "{} files without .{} extension will be flagged",
                discovery.non_data_count(),
                self.config.format.data_extension
            );
        }

        let outcome = self.validate_files(files, log).await?;

        let mut reports = outcome.reports;
        reports.sort_by(|a, b| a.path.cmp(&b.path));

        if outcome.write_failures > 0 {
            warn!(
                "{} reports could not be written to {}",
                outcome.write_failures,
                self.config.log_path.display()
            );
        }

        let processing_time_ms = start_time.elapsed().as_millis();
        info!(
            "Validated {} files in {}ms: {} valid, {} invalid",
            outcome.summary.total,
            processing_time_ms,
            outcome.summary.valid,
            outcome.summary.invalid
        );

        Ok(ValidationRun {
            directory: self.directory.clone(),
            log_path: self.config.log_path.clone(),
            summary: outcome.summary,
            reports,
            processing_time_ms,
        })
    }

    /// Run the bounded worker pool and hand every report to the log writer
    async fn validate_files(
        &self,
        files: Vec<PathBuf>,
        log: FindingLog,
    ) -> Result<writer::LogOutcome> {
        let workers = self.config.workers.max(1);
        let (sender, receiver) = mpsc::channel::<FileReport>(workers * 2);
        let log_task = spawn_log_writer(log, receiver);

        let pb = self.progress_bar(files.len() as u64);
        debug!("Validating {} files with {} workers", files.len(), workers);

        let mut results = stream::iter(files)
            .map(|path| {
                let config = Arc::clone(&self.config);
                async move {
                    let task_path = path.clone();
                    let task_config = Arc::clone(&config);
                    let validation =
                        task::spawn_blocking(move || validate_file(&task_path, &task_config));
                    match validation.await {
                        Ok(report) => report,
                        Err(e) => {
                            error!("Validation worker failed for {}: {}", path.display(), e);
                            worker_failure_report(path, &config, e.to_string())
                        }
                    }
                }
            })
            .buffer_unordered(workers);

        while let Some(report) = results.next().await {
            pb.set_message(report.file_name());
            pb.inc(1);
            if sender.send(report).await.is_err() {
                break;
            }
        }
        drop(sender);

        pb.finish_with_message("All station files validated");

        log_task.await.map_err(|e| ValidatorError::WorkerFailed {
            path: self.config.log_path.clone(),
            reason: format!("findings log writer stopped: {}", e),
        })
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        ) {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }
}

fn worker_failure_report(path: PathBuf, config: &ValidatorConfig, reason: String) -> FileReport {
    let has_data_extension = has_extension(&path, &config.format.data_extension);
    FileReport::new(
        path,
        vec![ValidationFinding::for_file(
            FindingCategory::Structural,
            format!("validation did not complete: {}", reason),
        )],
        0,
        has_data_extension,
    )
}
