//! Year/month cadence tracking.
//!
//! Each file carries one record per month starting at the configured epoch.
//! The tracker compares every record against the month it should carry and
//! then advances from the expected month, not the observed one, so a single
//! stray record produces one finding instead of a cascade.

use crate::calendar::next_month;
use crate::config::CadenceConfig;
use crate::models::{FindingCategory, ValidationFinding};

/// Cursor over the expected (year, month) of the next record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceState {
    pub expected_year: i32,
    pub expected_month: u32,
}

impl SequenceState {
    pub fn new(expected_year: i32, expected_month: u32) -> Self {
        Self {
            expected_year,
            expected_month,
        }
    }

    fn advance(&mut self) {
        let (year, month) = next_month(self.expected_year, self.expected_month);
        self.expected_year = year;
        self.expected_month = month;
    }
}

/// Per-file cadence state machine
#[derive(Debug)]
pub struct SequenceTracker {
    state: SequenceState,
    cadence: CadenceConfig,
}

impl SequenceTracker {
    pub fn new(cadence: CadenceConfig) -> Self {
        Self {
            state: SequenceState::new(cadence.epoch_year, cadence.epoch_month),
            cadence,
        }
    }

    /// The (year, month) the next record must carry
    pub fn state(&self) -> SequenceState {
        self.state
    }

    /// Check one record's year and month, then advance the cursor by one month
    pub fn observe(&mut self, line_number: usize, year: i32, month: u32) -> Vec<ValidationFinding> {
        let mut findings = Vec::new();
        let expected = self.state;
        let month_valid = (1..=12).contains(&month);

        if !month_valid {
            findings.push(ValidationFinding::at_line(
                line_number,
                FindingCategory::ParseError,
                format!("month {} is outside 1-12", month),
            ));
        }

        if !self.cadence.year_in_bounds(year) {
            findings.push(ValidationFinding::at_line(
                line_number,
                FindingCategory::SequenceError,
                format!(
                    "year {} is outside the accepted range {}-{}",
                    year, self.cadence.min_year, self.cadence.max_year
                ),
            ));
        } else if year != expected.expected_year
            || (month_valid && month != expected.expected_month)
        {
            findings.push(ValidationFinding::at_line(
                line_number,
                FindingCategory::SequenceError,
                format!(
                    "expected {}-{:02}, found {}-{:02}",
                    expected.expected_year, expected.expected_month, year, month
                ),
            ));
        }

        self.state.advance();
        findings
    }
}
