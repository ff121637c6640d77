//! Per-file validation loop
//!
//! Streams the lines of one station file through the header checks, the
//! record parser, the cadence tracker and the day-slot checks, collecting
//! every finding into a single [`FileReport`].

use crate::config::ValidatorConfig;
use crate::constants::{HEADER_LINES, STATION_ID_PREFIX};
use crate::day_validity::check_day_slots;
use crate::error::RecordError;
use crate::header::{FileHeader, expected_prefix_from_file_name};
use crate::models::{
    DayValue, FileReport, FindingCategory, RawLine, StationRecord, ValidationFinding, display_name,
};
use crate::record::parse_record;
use crate::sequence::SequenceTracker;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Incremental validation state for one file
///
/// Owns the file's cadence cursor; created per file and consumed by
/// [`FileValidation::finish`].
#[derive(Debug)]
pub struct FileValidation<'a> {
    config: &'a ValidatorConfig,
    expected_prefix: Option<String>,
    header_lines: Vec<RawLine>,
    tracker: SequenceTracker,
    findings: Vec<ValidationFinding>,
    records_checked: usize,
    unreadable: bool,
}

impl<'a> FileValidation<'a> {
    /// Start validating the file called `file_name`
    pub fn new(file_name: &str, config: &'a ValidatorConfig) -> Self {
        let mut findings = Vec::new();

        let expected_prefix = expected_prefix_from_file_name(file_name);
        if expected_prefix.is_none() {
            findings.push(ValidationFinding::for_file(
                FindingCategory::Structural,
                format!("cannot derive a station prefix from file name '{}'", file_name),
            ));
        }

        Self {
            config,
            expected_prefix,
            header_lines: Vec::with_capacity(HEADER_LINES),
            tracker: SequenceTracker::new(config.cadence.clone()),
            findings,
            records_checked: 0,
            unreadable: false,
        }
    }

    /// Record a file-level defect found outside the line loop
    pub fn push_finding(&mut self, finding: ValidationFinding) {
        self.findings.push(finding);
    }

    /// Record that the file could not be read; the line-count check no longer applies
    pub fn mark_unreadable(&mut self, finding: ValidationFinding) {
        self.unreadable = true;
        self.findings.push(finding);
    }

    /// Feed the next line of the file
    pub fn push_line(&mut self, line: RawLine) {
        if self.header_lines.len() < HEADER_LINES {
            self.header_lines.push(line);
            if self.header_lines.len() == HEADER_LINES {
                self.check_header();
            }
            return;
        }
        self.check_data_line(&line);
    }

    fn check_header(&mut self) {
        let mut lines = self.header_lines.iter().cloned();
        if let (Some(schema_line), Some(station_line)) = (lines.next(), lines.next()) {
            let header = FileHeader::new(schema_line, station_line, self.expected_prefix.clone());
            self.findings.extend(header.validate(&self.config.format));
        }
    }

    fn check_data_line(&mut self, line: &RawLine) {
        let record = match parse_record(&line.text, &self.config.format) {
            Ok(record) => record,
            Err(err) => {
                let category = match err {
                    RecordError::TooFewFields { .. } => FindingCategory::Structural,
                    RecordError::InvalidYear(_) | RecordError::InvalidMonth(_) => {
                        FindingCategory::ParseError
                    }
                };
                self.findings
                    .push(ValidationFinding::at_line(line.number, category, err.to_string()));
                return;
            }
        };

        self.records_checked += 1;
        self.check_record_prefix(&record, line.number);
        self.findings.extend(malformed_day_findings(&record, line.number));
        self.findings
            .extend(self.tracker.observe(line.number, record.year, record.month));
        self.findings.extend(check_day_slots(&record, line.number));
    }

    fn check_record_prefix(&mut self, record: &StationRecord, line_number: usize) {
        let Some(expected) = &self.expected_prefix else {
            return;
        };
        let mut chars = record.prefix.chars();
        let matches = chars.next() == Some(STATION_ID_PREFIX) && chars.as_str() == expected;
        if !matches {
            self.findings.push(ValidationFinding::at_line(
                line_number,
                FindingCategory::PrefixMismatch,
                format!(
                    "record station '{}' does not match file name station P{}",
                    record.prefix, expected
                ),
            ));
        }
    }

    /// Close the file and produce its report
    pub fn finish(mut self, path: PathBuf) -> FileReport {
        if !self.unreadable && self.header_lines.len() < HEADER_LINES {
            self.findings.push(ValidationFinding::for_file(
                FindingCategory::Structural,
                format!(
                    "not enough lines to be processed: found {}, need at least {}",
                    self.header_lines.len(),
                    HEADER_LINES
                ),
            ));
        }

        let has_data_extension = has_extension(&path, &self.config.format.data_extension);
        FileReport::new(path, self.findings, self.records_checked, has_data_extension)
    }
}

fn malformed_day_findings(record: &StationRecord, line_number: usize) -> Vec<ValidationFinding> {
    record
        .days()
        .filter_map(|(day, value)| match value {
            DayValue::Malformed(token) => Some(ValidationFinding::at_line(
                line_number,
                FindingCategory::ParseError,
                format!("day {} value '{}' is neither numeric nor the sentinel", day, token),
            )),
            _ => None,
        })
        .collect()
}

pub(crate) fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}

/// Validate one file on disk
///
/// Never fails: an unopenable or unreadable file becomes a `Structural`
/// finding in the returned report.
pub fn validate_file(path: &Path, config: &ValidatorConfig) -> FileReport {
    let file_name = display_name(path);
    let mut validation = FileValidation::new(&file_name, config);

    if !has_extension(path, &config.format.data_extension) {
        validation.push_finding(ValidationFinding::for_file(
            FindingCategory::Structural,
            format!("not a .{} file", config.format.data_extension),
        ));
    }

    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            validation.mark_unreadable(ValidationFinding::for_file(
                FindingCategory::Structural,
                format!("cannot open file: {}", err),
            ));
            return validation.finish(path.to_path_buf());
        }
    };

    for (index, line) in BufReader::new(file).lines().enumerate() {
        match line {
            Ok(text) => validation.push_line(RawLine::new(index + 1, text)),
            Err(err) => {
                validation.mark_unreadable(ValidationFinding::at_line(
                    index + 1,
                    FindingCategory::Structural,
                    format!("file is not readable past this line: {}", err),
                ));
                break;
            }
        }
    }

    let report = validation.finish(path.to_path_buf());
    debug!(
        "Validated {}: {} records, {} findings",
        file_name,
        report.records_checked,
        report.findings.len()
    );
    report
}

/// Validate in-memory lines as if they were the content of `file_name`
pub fn validate_lines<'l>(
    file_name: &str,
    lines: impl IntoIterator<Item = &'l str>,
    config: &ValidatorConfig,
) -> FileReport {
    let mut validation = FileValidation::new(file_name, config);
    for (index, text) in lines.into_iter().enumerate() {
        validation.push_line(RawLine::new(index + 1, text));
    }
    validation.finish(PathBuf::from(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::tests::fixtures::{StationFileBuilder, record_line, record_line_with_days};

    const FILE_NAME: &str = "precip.P7.MIROC5.RCP60.dat";

    fn validate(content: &str) -> FileReport {
        validate_lines(FILE_NAME, content.lines(), &ValidatorConfig::default())
    }

    #[test]
    fn test_conformant_file_is_valid() {
        let content = StationFileBuilder::new(7).months(30).build();
        let report = validate(&content);

        assert!(report.valid, "{:?}", report.findings);
        assert!(report.findings.is_empty());
        assert_eq!(report.records_checked, 30);
        assert!(report.has_data_extension);
    }

    #[test]
    fn test_month_swap_yields_single_sequence_error() {
        let content = StationFileBuilder::new(7)
            .months(12)
            .replace_record(4, record_line("P7", 2006, 7))
            .build();
        let report = validate(&content);

        assert_eq!(report.findings.len(), 1, "{:?}", report.findings);
        assert_eq!(report.count(FindingCategory::SequenceError), 1);
        assert_eq!(report.findings[0].line_number, Some(7));
    }

    #[test]
    fn test_altered_header_keeps_processing() {
        let content = StationFileBuilder::new(7)
            .schema_line("precip\tMIROC5\tRCP60\tREGRESION\tdecimas\t2")
            .months(3)
            .replace_record(2, record_line("P7", 2006, 9))
            .build();
        let report = validate(&content);

        assert_eq!(report.count(FindingCategory::HeaderMismatch), 1);
        assert_eq!(report.count(FindingCategory::SequenceError), 1);
        assert_eq!(report.records_checked, 3);
    }

    #[test]
    fn test_record_prefix_mismatch() {
        let content = StationFileBuilder::new(7)
            .months(3)
            .replace_record(1, record_line("P8", 2006, 2))
            .build();
        let report = validate(&content);

        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.count(FindingCategory::PrefixMismatch), 1);
    }

    #[test]
    fn test_record_prefix_needs_station_letter() {
        for wrong in ["Q7", "X7", "7"] {
            let content = StationFileBuilder::new(7)
                .months(3)
                .replace_record(1, record_line(wrong, 2006, 2))
                .build();
            let report = validate(&content);

            assert_eq!(report.findings.len(), 1, "{}: {:?}", wrong, report.findings);
            assert_eq!(report.count(FindingCategory::PrefixMismatch), 1);
            assert_eq!(report.findings[0].line_number, Some(4));
        }
    }

    #[test]
    fn test_short_line_is_structural() {
        let mut content = StationFileBuilder::new(7).months(2).build();
        content.push_str("P7 2006 3 1 2 3\n");
        let report = validate(&content);

        assert_eq!(report.count(FindingCategory::Structural), 1);
        assert_eq!(report.findings[0].line_number, Some(5));
        assert_eq!(report.records_checked, 2);
    }

    #[test]
    fn test_unparseable_record_does_not_advance_cursor() {
        let mut lines = StationFileBuilder::new(7).months(3).build_lines();
        lines.insert(3, record_line("P7", 2006, 2).replacen("2006", "20O6", 1));
        let content = lines.join("\n");
        let report = validate(&content);

        assert_eq!(report.findings.len(), 1, "{:?}", report.findings);
        assert_eq!(report.count(FindingCategory::ParseError), 1);
    }

    #[test]
    fn test_malformed_day_token() {
        let mut lines = StationFileBuilder::new(7).months(1).build_lines();
        lines[2] = lines[2].replacen(" 12 ", " abc ", 1);
        let report = validate(&lines.join("\n"));

        assert_eq!(report.findings.len(), 1, "{:?}", report.findings);
        assert_eq!(report.count(FindingCategory::ParseError), 1);
    }

    #[test]
    fn test_not_enough_lines() {
        let report = validate("precip\tMIROC5\tRCP60\tREGRESION\tdecimas\t1\n");
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.count(FindingCategory::Structural), 1);
        assert_eq!(report.findings[0].line_number, None);

        let empty = validate("");
        assert_eq!(empty.count(FindingCategory::Structural), 1);
    }

    #[test]
    fn test_file_name_without_prefix() {
        let content = StationFileBuilder::new(7).months(2).build();
        let report = validate_lines("precip.dat", content.lines(), &ValidatorConfig::default());

        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.count(FindingCategory::Structural), 1);
    }

    #[test]
    fn test_leap_year_february() {
        let config = ValidatorConfig::default().with_epoch(2008, 1);

        let content = StationFileBuilder::new(7).epoch(2008, 1).months(3).build();
        let report = validate_lines(FILE_NAME, content.lines(), &config);
        assert!(report.valid, "{:?}", report.findings);

        let content = StationFileBuilder::new(7)
            .epoch(2008, 1)
            .months(3)
            .replace_record(1, record_line_with_days("P7", 2008, 2, 28))
            .build();
        let report = validate_lines(FILE_NAME, content.lines(), &config);
        assert!(report.valid, "{:?}", report.findings);
    }

    #[test]
    fn test_common_year_february_29() {
        let content = StationFileBuilder::new(7)
            .months(3)
            .replace_record(1, record_line_with_days("P7", 2006, 2, 29))
            .build();
        let report = validate(&content);

        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.count(FindingCategory::DayValidityError), 1);
    }
}
