//! Data line parsing.
//!
//! Turns one whitespace-delimited data line into a [`StationRecord`].
//! Producers mix tabs and spaces, so any run of either separates tokens.

use crate::config::FileFormatConfig;
use crate::constants::RECORD_METADATA_FIELDS;
use crate::error::RecordError;
use crate::models::{DayValue, StationRecord};

/// Parse one data line
///
/// Sentinel tokens become [`DayValue::Missing`]; anything that is neither a
/// sentinel nor a finite number is kept as [`DayValue::Malformed`] so the
/// caller can report it without losing the record's year and month.
pub fn parse_record(line: &str, format: &FileFormatConfig) -> Result<StationRecord, RecordError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    if tokens.len() < format.min_record_fields {
        return Err(RecordError::TooFewFields {
            found: tokens.len(),
            required: format.min_record_fields,
        });
    }

    let year = tokens[1]
        .parse::<i32>()
        .map_err(|_| RecordError::InvalidYear(tokens[1].to_string()))?;
    let month = tokens[2]
        .parse::<u32>()
        .map_err(|_| RecordError::InvalidMonth(tokens[2].to_string()))?;

    let day_values = tokens[RECORD_METADATA_FIELDS..]
        .iter()
        .map(|token| parse_day_value(token, format))
        .collect();

    Ok(StationRecord {
        prefix: tokens[0].to_string(),
        year,
        month,
        day_values,
    })
}

fn parse_day_value(token: &str, format: &FileFormatConfig) -> DayValue {
    if format.is_sentinel(token) {
        return DayValue::Missing;
    }
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => DayValue::Present(value),
        _ => DayValue::Malformed(token.to_string()),
    }
}
