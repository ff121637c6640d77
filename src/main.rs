use anyhow::Context;
use clap::Parser;
use precip_validator::DirectoryValidator;
use precip_validator::cli::{Args, OutputFormat, setup_logging};
use precip_validator::report::{print_file_result, print_summary, render_json};
use std::process;

/// Exit status when at least one file has findings
const EXIT_INVALID: i32 = 1;
/// Exit status for configuration or runtime failures
const EXIT_FAILURE: i32 = 2;

fn main() {
    let args = Args::parse();
    setup_logging(&args);

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(EXIT_FAILURE);
    });

    match runtime.block_on(run(&args)) {
        Ok(true) => process::exit(0),
        Ok(false) => process::exit(EXIT_INVALID),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(EXIT_FAILURE);
        }
    }
}

/// Validate the directory and report; `Ok(true)` when every file is valid
async fn run(args: &Args) -> anyhow::Result<bool> {
    let validator = DirectoryValidator::new(args.directory.clone(), args.to_config())
        .context("Invalid validator configuration")?;

    let run = validator
        .run()
        .await
        .with_context(|| format!("Validation of {} failed", args.directory.display()))?;

    match args.format {
        OutputFormat::Human => {
            if args.list_files {
                for report in &run.reports {
                    print_file_result(report);
                }
            }
            print_summary(&run, args.breakdown);
        }
        OutputFormat::Json => {
            println!("{}", render_json(&run)?);
        }
    }

    Ok(run.all_valid())
}
