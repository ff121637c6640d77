//! Gregorian calendar helpers.

use crate::error::CalendarError;

/// Standard Gregorian leap-year rule
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`, with 29 for February in leap years
pub fn days_in_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    let days = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => return Err(CalendarError::InvalidMonth { month }),
    };
    Ok(days)
}

/// The calendar month following `(year, month)`, wrapping December into January
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leap_year_rule() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(2100));
    }

    #[test]
    fn test_february_lengths() {
        assert_eq!(days_in_month(2000, 2), Ok(29));
        assert_eq!(days_in_month(1900, 2), Ok(28));
        assert_eq!(days_in_month(2024, 2), Ok(29));
        assert_eq!(days_in_month(2023, 2), Ok(28));
    }

    #[test]
    fn test_february_tracks_leap_rule() {
        for year in 1800..=2400 {
            let feb = days_in_month(year, 2).unwrap();
            assert_eq!(feb == 29, is_leap_year(year), "year {}", year);
        }
    }

    #[test]
    fn test_month_lengths() {
        let expected = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (index, days) in expected.iter().enumerate() {
            assert_eq!(days_in_month(2023, index as u32 + 1), Ok(*days));
        }
    }

    #[test]
    fn test_invalid_month_is_an_error() {
        assert_eq!(
            days_in_month(2023, 0),
            Err(CalendarError::InvalidMonth { month: 0 })
        );
        assert_eq!(
            days_in_month(2023, 13),
            Err(CalendarError::InvalidMonth { month: 13 })
        );
    }

    #[test]
    fn test_next_month_wraps_year() {
        assert_eq!(next_month(2006, 1), (2006, 2));
        assert_eq!(next_month(2006, 12), (2007, 1));
    }
}
