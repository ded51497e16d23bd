//! Input validation for schedule loading.

use chrono::Datelike;

use crate::{Result, ScheduleError};

/// First season the schedule API covers.
pub const MIN_YEAR: i32 = 1950;

/// Validate a season year against the current calendar year.
///
/// With `allow_future` the next season is accepted as well, since schedules
/// are published ahead of time.
pub fn validate_year(year: i32, allow_future: bool) -> Result<i32> {
    validate_year_at(year, allow_future, chrono::Local::now().year())
}

/// Validate a season year against an explicit current year.
pub fn validate_year_at(year: i32, allow_future: bool, current_year: i32) -> Result<i32> {
    let max_year = if allow_future {
        current_year + 1
    } else {
        current_year
    };

    if (MIN_YEAR..=max_year).contains(&year) {
        Ok(year)
    } else {
        Err(ScheduleError::Validation(format!(
            "Year must be between {MIN_YEAR} and {max_year}."
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_before_1950_is_rejected() {
        let err = validate_year_at(1949, false, 2024).unwrap_err();
        assert_eq!(err.to_string(), "Year must be between 1950 and 2024.");
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert_eq!(validate_year_at(1950, false, 2024).unwrap(), 1950);
        assert_eq!(validate_year_at(2024, false, 2024).unwrap(), 2024);
        assert_eq!(validate_year_at(2025, true, 2024).unwrap(), 2025);
    }

    #[test]
    fn test_next_year_needs_allow_future() {
        assert!(validate_year_at(2025, false, 2024).is_err());
    }

    #[test]
    fn test_two_years_ahead_is_always_rejected() {
        let err = validate_year_at(2026, true, 2024).unwrap_err();
        assert_eq!(err.to_string(), "Year must be between 1950 and 2025.");
    }

    #[test]
    fn test_validate_year_uses_current_year() {
        let current = chrono::Local::now().year();
        assert!(validate_year(current, false).is_ok());
        assert!(validate_year(current + 1, false).is_err());
        assert!(validate_year(current + 2, true).is_err());
    }
}
