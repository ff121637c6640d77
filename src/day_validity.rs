//! Sentinel placement checks for the day slots of a record.
//!
//! Days that exist in the record's month must carry data and days that do
//! not exist must carry the sentinel. The one tolerated deviation is the
//! leap day: in a 29-day February, day 29 may be either.

use crate::calendar::days_in_month;
use crate::models::{DayValue, FindingCategory, StationRecord, ValidationFinding};

/// Check every day slot of `record` against the length of its month
///
/// Records whose month is outside 1-12 are skipped; the cadence check
/// already reports them.
pub fn check_day_slots(record: &StationRecord, line_number: usize) -> Vec<ValidationFinding> {
    let Ok(days) = days_in_month(record.year, record.month) else {
        return Vec::new();
    };
    let days = days as usize;

    record
        .days()
        .filter_map(|(day, value)| check_slot(record, day, days, value))
        .map(|message| {
            ValidationFinding::at_line(line_number, FindingCategory::DayValidityError, message)
        })
        .collect()
}

fn check_slot(record: &StationRecord, day: usize, days: usize, value: &DayValue) -> Option<String> {
    if day > days {
        if !value.is_missing() {
            return Some(format!(
                "data present for day {} of {}-{:02}, which has {} days",
                day, record.year, record.month, days
            ));
        }
    } else if value.is_missing() && !is_tolerated_leap_day(record.month, day, days) {
        return Some(format!(
            "missing value for day {} of {}-{:02}",
            day, record.year, record.month
        ));
    }
    None
}

// Leap day 29 may be present or sentinel in the source data.
fn is_tolerated_leap_day(month: u32, day: usize, days: usize) -> bool {
    month == 2 && day > 28 && days == 29
}
