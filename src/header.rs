//! Station file header checks.
//!
//! Every file opens with two fixed-format lines: the schema line, which
//! must match a constant exactly, and the station line, which carries the
//! `P<n>` station identifier that must agree with the file name.

use crate::config::FileFormatConfig;
use crate::constants::STATION_ID_PREFIX;
use crate::models::{FindingCategory, RawLine, ValidationFinding};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

const STATION_ID_PATTERN: &str = r"^P[0-9]+$";

static STATION_ID_REGEX: OnceLock<Regex> = OnceLock::new();

fn station_id_regex() -> &'static Regex {
    STATION_ID_REGEX.get_or_init(|| Regex::new(STATION_ID_PATTERN).expect("invalid regex pattern"))
}

/// Whether `id` has the `P<digits>` shape
pub fn is_station_id(id: &str) -> bool {
    station_id_regex().is_match(id)
}

/// Station number carried by an identifier: everything after its first character
pub fn station_suffix(id: &str) -> &str {
    let mut chars = id.chars();
    chars.next();
    chars.as_str()
}

/// Derive the expected station number from a file name
///
/// The second dot-delimited segment holds the station id, so
/// `precip.P12.MIROC5.RCP60.dat` yields `12`. Returns `None` when there is
/// no such segment or it carries no number.
pub fn expected_prefix_from_file_name(file_name: &str) -> Option<String> {
    let segment = file_name.split('.').nth(1)?;
    let suffix = station_suffix(segment);
    if suffix.is_empty() || !suffix.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(suffix.to_string())
}

/// The first two lines of a station file
#[derive(Debug, Clone)]
pub struct FileHeader {
    pub schema_line: RawLine,
    pub station_line: RawLine,
    pub expected_prefix: Option<String>,
}

impl FileHeader {
    pub fn new(
        schema_line: RawLine,
        station_line: RawLine,
        expected_prefix: Option<String>,
    ) -> Self {
        Self {
            schema_line,
            station_line,
            expected_prefix,
        }
    }

    /// Check both header lines, reporting every defect independently
    pub fn validate(&self, format: &FileFormatConfig) -> Vec<ValidationFinding> {
        let mut findings = Vec::new();

        if self.schema_line.text.trim() != format.schema_header {
            findings.push(ValidationFinding::at_line(
                self.schema_line.number,
                FindingCategory::HeaderMismatch,
                "schema line does not match the expected header",
            ));
        }

        let fields: Vec<&str> = self.station_line.text.trim().split('\t').collect();
        let station_id = fields[0].trim();

        if fields.len() != format.station_line_fields {
            findings.push(ValidationFinding::at_line(
                self.station_line.number,
                FindingCategory::HeaderMismatch,
                format!(
                    "station line has {} tab-delimited fields, expected {}",
                    fields.len(),
                    format.station_line_fields
                ),
            ));
        }

        if !station_id.starts_with(STATION_ID_PREFIX) {
            findings.push(ValidationFinding::at_line(
                self.station_line.number,
                FindingCategory::HeaderMismatch,
                format!("station id '{}' does not start with 'P'", station_id),
            ));
        } else if !is_station_id(station_id) {
            findings.push(ValidationFinding::at_line(
                self.station_line.number,
                FindingCategory::HeaderMismatch,
                format!("station id '{}' is not of the form P<digits>", station_id),
            ));
        }

        if let Some(expected) = &self.expected_prefix {
            if station_suffix(station_id) != expected {
                findings.push(ValidationFinding::at_line(
                    self.station_line.number,
                    FindingCategory::PrefixMismatch,
                    format!(
                        "station id '{}' does not match file name station P{}",
                        station_id, expected
                    ),
                ));
            }
        }

        debug!("Header checked with {} findings", findings.len());
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SCHEMA_HEADER;

    const STATION_LINE: &str = "P7\t41.38\t2.17\t12\tBCN\tES\t1\t0";

    fn header(schema: &str, station: &str, prefix: Option<&str>) -> FileHeader {
        FileHeader::new(
            RawLine::new(1, schema),
            RawLine::new(2, station),
            prefix.map(str::to_string),
        )
    }

    #[test]
    fn test_prefix_from_file_name() {
        assert_eq!(
            expected_prefix_from_file_name("precip.P7.MIROC5.RCP60.dat"),
            Some("7".to_string())
        );
        assert_eq!(
            expected_prefix_from_file_name("precip.P12.MIROC5.RCP60.2006-2100.dat"),
            Some("12".to_string())
        );
        assert_eq!(expected_prefix_from_file_name("precip"), None);
        assert_eq!(expected_prefix_from_file_name("precip.P.dat"), None);
        assert_eq!(expected_prefix_from_file_name("precip.dat"), None);
    }

    #[test]
    fn test_station_id_shape() {
        assert!(is_station_id("P7"));
        assert!(is_station_id("P120"));
        assert!(!is_station_id("P"));
        assert!(!is_station_id("Pabc"));
        assert!(!is_station_id("7"));
    }

    #[test]
    fn test_valid_header() {
        let findings = header(SCHEMA_HEADER, STATION_LINE, Some("7"))
            .validate(&FileFormatConfig::default());
        assert!(findings.is_empty(), "{:?}", findings);
    }

    #[test]
    fn test_trailing_whitespace_tolerated() {
        let schema = format!("{}\r\n", SCHEMA_HEADER);
        let station = format!("{}\n", STATION_LINE);
        let findings = header(&schema, &station, Some("7")).validate(&FileFormatConfig::default());
        assert!(findings.is_empty(), "{:?}", findings);
    }

    #[test]
    fn test_one_character_schema_change() {
        let altered = SCHEMA_HEADER.replace("RCP60", "RCP61");
        let findings = header(&altered, STATION_LINE, Some("7"))
            .validate(&FileFormatConfig::default());

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, FindingCategory::HeaderMismatch);
        assert_eq!(findings[0].line_number, Some(1));
    }

    #[test]
    fn test_wrong_field_count() {
        let findings = header(SCHEMA_HEADER, "P7\t41.38\t2.17", Some("7"))
            .validate(&FileFormatConfig::default());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, FindingCategory::HeaderMismatch);
        assert_eq!(findings[0].line_number, Some(2));
    }

    #[test]
    fn test_prefix_mismatch() {
        let findings = header(SCHEMA_HEADER, STATION_LINE, Some("8"))
            .validate(&FileFormatConfig::default());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, FindingCategory::PrefixMismatch);
    }

    #[test]
    fn test_all_defects_reported() {
        let findings = header("garbage", "X9\tonly", Some("7"))
            .validate(&FileFormatConfig::default());
        let categories: Vec<_> = findings.iter().map(|f| f.category).collect();

        assert_eq!(
            categories,
            vec![
                FindingCategory::HeaderMismatch,
                FindingCategory::HeaderMismatch,
                FindingCategory::HeaderMismatch,
                FindingCategory::PrefixMismatch,
            ]
        );
    }

    #[test]
    fn test_empty_station_line_does_not_panic() {
        let findings = header("", "", None).validate(&FileFormatConfig::default());
        assert!(findings.iter().all(|f| f.category == FindingCategory::HeaderMismatch));
        assert_eq!(findings.len(), 3);
    }
}
