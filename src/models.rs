//! Core data structures for station file validation.
//!
//! Defines the parsed record shape, the finding taxonomy, per-file reports
//! and the directory-level summary built from them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// One line of a station file, numbered from 1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub number: usize,
    pub text: String,
}

impl RawLine {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// A single day slot of a data record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DayValue {
    /// Sentinel token: the measurement is intentionally absent
    Missing,
    /// Numeric token, magnitude not interpreted
    Present(f64),
    /// Neither the sentinel nor a number
    Malformed(String),
}

impl DayValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, DayValue::Missing)
    }
}

/// One parsed data line: `<prefix> <year> <month> <day1> ... <day31>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub prefix: String,
    pub year: i32,
    pub month: u32,
    pub day_values: Vec<DayValue>,
}

impl StationRecord {
    /// Day slots paired with their 1-based day index
    pub fn days(&self) -> impl Iterator<Item = (usize, &DayValue)> {
        self.day_values.iter().enumerate().map(|(i, v)| (i + 1, v))
    }
}

/// Category of a validation defect
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FindingCategory {
    /// Missing, short or unreadable file, wrong extension, short data line
    Structural,
    /// Line 1 or line 2 does not match the fixed header format
    HeaderMismatch,
    /// Station id does not match the file name
    PrefixMismatch,
    /// Year/month cadence violated
    SequenceError,
    /// Sentinel/data placement wrong for the month
    DayValidityError,
    /// Non-numeric token where a number was required
    ParseError,
}

impl FindingCategory {
    pub const ALL: [FindingCategory; 6] = [
        FindingCategory::Structural,
        FindingCategory::HeaderMismatch,
        FindingCategory::PrefixMismatch,
        FindingCategory::SequenceError,
        FindingCategory::DayValidityError,
        FindingCategory::ParseError,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FindingCategory::Structural => "Structural",
            FindingCategory::HeaderMismatch => "HeaderMismatch",
            FindingCategory::PrefixMismatch => "PrefixMismatch",
            FindingCategory::SequenceError => "SequenceError",
            FindingCategory::DayValidityError => "DayValidityError",
            FindingCategory::ParseError => "ParseError",
        }
    }
}

impl fmt::Display for FindingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One atomic, independently reported defect
///
/// `line_number` is `None` for file-level findings such as an unreadable
/// file or a file name without a station prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFinding {
    pub line_number: Option<usize>,
    pub category: FindingCategory,
    pub message: String,
}

impl ValidationFinding {
    pub fn at_line(
        line_number: usize,
        category: FindingCategory,
        message: impl Into<String>,
    ) -> Self {
        Self {
            line_number: Some(line_number),
            category,
            message: message.into(),
        }
    }

    pub fn for_file(category: FindingCategory, message: impl Into<String>) -> Self {
        Self {
            line_number: None,
            category,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line_number {
            Some(line) => write!(f, "line {} [{}]: {}", line, self.category, self.message),
            None => write!(f, "[{}]: {}", self.category, self.message),
        }
    }
}

/// All findings for one file, finalised once the file has been read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub findings: Vec<ValidationFinding>,
    pub counts: BTreeMap<FindingCategory, usize>,
    pub records_checked: usize,
    pub has_data_extension: bool,
    pub valid: bool,
}

impl FileReport {
    pub fn new(
        path: PathBuf,
        findings: Vec<ValidationFinding>,
        records_checked: usize,
        has_data_extension: bool,
    ) -> Self {
        let mut counts = BTreeMap::new();
        for finding in &findings {
            *counts.entry(finding.category).or_insert(0) += 1;
        }
        let valid = findings.is_empty();

        Self {
            path,
            findings,
            counts,
            records_checked,
            has_data_extension,
            valid,
        }
    }

    /// Number of findings in `category`
    pub fn count(&self, category: FindingCategory) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    /// File name for display, falling back to the full path
    pub fn file_name(&self) -> String {
        display_name(&self.path)
    }
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Directory-level aggregate of file reports
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorySummary {
    pub total: usize,
    pub non_dat: usize,
    pub valid: usize,
    pub invalid: usize,
    pub records_checked: usize,
    pub category_totals: BTreeMap<FindingCategory, usize>,
}

impl DirectorySummary {
    pub fn from_reports<'a>(reports: impl IntoIterator<Item = &'a FileReport>) -> Self {
        let mut summary = Self::default();
        for report in reports {
            summary.add(report);
        }
        summary
    }

    /// Fold one report into the running totals
    pub fn add(&mut self, report: &FileReport) {
        self.total += 1;
        if !report.has_data_extension {
            self.non_dat += 1;
        }
        if report.valid {
            self.valid += 1;
        } else {
            self.invalid += 1;
        }
        self.records_checked += report.records_checked;
        for (category, count) in &report.counts {
            *self.category_totals.entry(*category).or_insert(0) += count;
        }
    }

    pub fn all_valid(&self) -> bool {
        self.invalid == 0
    }

    /// Grand total for `category`
    pub fn category_total(&self, category: FindingCategory) -> usize {
        self.category_totals.get(&category).copied().unwrap_or(0)
    }
}
