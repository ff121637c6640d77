//! Terminal rendering of validation results.

use crate::error::Result;
use crate::models::{DirectorySummary, FileReport, FindingCategory};
use crate::processor::ValidationRun;

use colored::*;

/// Invalid files listed individually before the list is truncated
const MAX_LISTED_FILES: usize = 10;

/// One line per file: PASS/FAIL plus finding count
pub fn print_file_result(report: &FileReport) {
    if report.valid {
        println!("  {} {}", "PASS".bright_green().bold(), report.file_name());
    } else {
        println!(
            "  {} {} {}",
            "FAIL".bright_red().bold(),
            report.file_name(),
            format!("({} findings)", report.findings.len()).bright_black()
        );
    }
}

/// Coloured run summary, optionally with the per-category breakdown
pub fn print_summary(run: &ValidationRun, breakdown: bool) {
    let summary = &run.summary;

    println!("\n{}", "Validation Summary".bright_green().bold());
    println!(
        "  {} {}",
        "Directory:".bright_cyan(),
        run.directory.display()
    );
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        run.processing_time_ms.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Files checked:".bright_cyan(),
        summary.total.to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Records checked:".bright_cyan(),
        summary.records_checked.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Valid files:".bright_cyan(),
        summary.valid.to_string().bright_green()
    );
    if summary.invalid > 0 {
        println!(
            "  {} {}",
            "Invalid files:".bright_red(),
            summary.invalid.to_string().bright_red().bold()
        );
    }
    if summary.non_dat > 0 {
        println!(
            "  {} {}",
            "Non-.dat files:".bright_yellow(),
            summary.non_dat.to_string().bright_yellow()
        );
    }

    let invalid: Vec<_> = run.invalid_reports().collect();
    if !invalid.is_empty() {
        println!("\n{}", "Files with findings:".bright_yellow());
        for report in invalid.iter().take(MAX_LISTED_FILES) {
            print_file_result(report);
        }
        if invalid.len() > MAX_LISTED_FILES {
            println!(
                "  ... and {} more files with findings",
                invalid.len() - MAX_LISTED_FILES
            );
        }
    }

    if breakdown {
        println!("\n{}", "Findings by category:".bright_cyan());
        for (category, count) in breakdown_rows(summary) {
            let count = if count > 0 {
                count.to_string().bright_red()
            } else {
                count.to_string().bright_white()
            };
            println!("  {:<18} {}", category.as_str(), count);
        }
    }

    println!();
    if summary.all_valid() {
        println!(
            "{}",
            "Validation passed: every station file matches the expected format."
                .bright_green()
                .bold()
        );
    } else {
        println!(
            "{}",
            "Validation failed: errors were found in one or more station files."
                .bright_red()
                .bold()
        );
        println!(
            "  {} {}",
            "Details logged to".bright_black(),
            run.log_path.display()
        );
    }
}

/// Every category with its grand total, in taxonomy order
pub fn breakdown_rows(summary: &DirectorySummary) -> Vec<(FindingCategory, usize)> {
    FindingCategory::ALL
        .iter()
        .map(|category| (*category, summary.category_total(*category)))
        .collect()
}

/// Pretty JSON of the whole run
pub fn render_json(run: &ValidationRun) -> Result<String> {
    Ok(serde_json::to_string_pretty(run)?)
}
