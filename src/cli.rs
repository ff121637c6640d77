//! Command-line interface components.

use crate::config::ValidatorConfig;
use crate::constants::DEFAULT_LOG_FILE;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "precip-validator")]
#[command(about = "Validate fixed-format monthly precipitation station files")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Directory containing the station files
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Number of files validated concurrently (defaults to the CPU count)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Append-only findings log
    #[arg(long, value_name = "FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Year of the first data record
    #[arg(long)]
    pub epoch_year: Option<i32>,

    /// Month (1-12) of the first data record
    #[arg(long)]
    pub epoch_month: Option<u32>,

    /// Earliest acceptable record year
    #[arg(long)]
    pub min_year: Option<i32>,

    /// Latest acceptable record year
    #[arg(long)]
    pub max_year: Option<i32>,

    /// Show finding counts per category
    #[arg(long)]
    pub breakdown: bool,

    /// Print PASS/FAIL for every file, not only failing ones
    #[arg(long)]
    pub list_files: bool,

    /// Output format for the run summary
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only report errors; hides the progress bar
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Output formats for the run summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Coloured human-readable summary
    Human,
    /// JSON for scripting
    Json,
}

impl Args {
    /// Build the run configuration from defaults and flags
    pub fn to_config(&self) -> ValidatorConfig {
        let mut config = ValidatorConfig::default().with_log_path(&self.log_file);

        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }

        let cadence = config.cadence.clone();
        config = config
            .with_epoch(
                self.epoch_year.unwrap_or(cadence.epoch_year),
                self.epoch_month.unwrap_or(cadence.epoch_month),
            )
            .with_year_bounds(
                self.min_year.unwrap_or(cadence.min_year),
                self.max_year.unwrap_or(cadence.max_year),
            );

        if self.quiet || self.format == OutputFormat::Json {
            config = config.without_progress();
        }
        config
    }

    pub fn get_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("precip_validator={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}
