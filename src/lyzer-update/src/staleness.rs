//! Decides whether an unforced update check is due.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{UpdateError, UpdateResult};

/// Minimum number of whole days between unforced remote checks.
pub const STALENESS_WINDOW_DAYS: i64 = 1;

/// Naive layouts accepted for timestamps written without an offset.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a persisted ISO 8601 timestamp.
///
/// Values with an offset are converted to UTC; values without one are read as UTC.
pub fn parse_timestamp(value: &str) -> UpdateResult<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| UpdateError::MalformedTimestamp {
            timestamp: value.to_string(),
        })
}

/// Render a timestamp the way it is persisted.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339()
}

/// Whether a remote check is due given the last recorded check.
///
/// Empty or unparseable values are treated as due. Otherwise the whole-day
/// difference is truncated, so 23h59m is not due and 24h00m is.
pub fn is_due(last_checked: &str, now: DateTime<Utc>) -> bool {
    if last_checked.trim().is_empty() {
        return true;
    }

    match parse_timestamp(last_checked) {
        Ok(last) => (now - last).num_days() >= STALENESS_WINDOW_DAYS,
        Err(err) => {
            tracing::debug!("treating update check as due: {err}");
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_is_due() {
        assert!(is_due("", now()));
        assert!(is_due("   ", now()));
    }

    #[test]
    fn test_unparseable_is_due() {
        assert!(is_due("100", now()));
        assert!(is_due("yesterday", now()));
        assert!(matches!(
            parse_timestamp("yesterday"),
            Err(UpdateError::MalformedTimestamp { .. })
        ));
    }

    #[test]
    fn test_just_under_a_day_is_not_due() {
        let last = now() - Duration::hours(23) - Duration::minutes(59);
        assert!(!is_due(&format_timestamp(last), now()));
    }

    #[test]
    fn test_exactly_a_day_is_due() {
        let last = now() - Duration::hours(24);
        assert!(is_due(&format_timestamp(last), now()));
    }

    #[test]
    fn test_an_hour_ago_is_not_due() {
        let last = now() - Duration::hours(1);
        assert!(!is_due(&format_timestamp(last), now()));
    }

    #[test]
    fn test_future_timestamp_is_not_due() {
        let last = now() + Duration::days(3);
        assert!(!is_due(&format_timestamp(last), now()));
    }

    #[test]
    fn test_parse_accepts_offsets_and_naive_values() {
        let expected = Utc.with_ymd_and_hms(2024, 6, 14, 10, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-06-14T10:30:00Z").unwrap(), expected);
        assert_eq!(
            parse_timestamp("2024-06-14T12:30:00+02:00").unwrap(),
            expected
        );
        assert_eq!(parse_timestamp("2024-06-14T10:30:00").unwrap(), expected);
        assert_eq!(
            parse_timestamp("2024-06-14 10:30:00.000000").unwrap(),
            expected
        );
    }

    #[test]
    fn test_format_round_trips() {
        assert_eq!(parse_timestamp(&format_timestamp(now())).unwrap(), now());
    }
}
