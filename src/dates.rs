//! Date helpers for replication bookmarks and report ranges
//!
//! Zoho Books mixes several timestamp layouts (`2023-05-01T10:11:12+0530`,
//! plain dates, RFC 3339 from `start_date`). Everything is normalized to a
//! `DateTime<FixedOffset>`; naive values are taken as UTC.

use crate::error::{Error, Result};
use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike,
};

/// Formats tried in order, with an explicit offset
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%dT%H:%M%z",
];

/// Formats tried in order, without an offset
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"];

/// Layout the API expects for `last_modified_time`
pub const ZOHO_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Layout for report `from_date` / `to_date`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a timestamp in any of the layouts the API or config may use
pub fn infer_date(value: &str) -> Result<DateTime<FixedOffset>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt);
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Ok(dt);
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Ok(date.and_time(NaiveTime::MIN).and_utc().fixed_offset());
    }

    Err(Error::InvalidDate {
        value: value.to_string(),
    })
}

/// Render the `last_modified_time` filter for a bookmark.
///
/// The API filter is inclusive, so the bookmark is moved one second forward
/// and sub-second precision is dropped.
pub fn format_last_modified(dt: DateTime<FixedOffset>) -> String {
    let next = dt + Duration::seconds(1);
    let next = next.with_nanosecond(0).unwrap_or(next);
    next.format(ZOHO_DATETIME_FORMAT).to_string()
}

/// Last calendar day of the month containing `date`
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(date)
}

/// Time left until one second past the next midnight
pub fn duration_until_next_day(now: NaiveDateTime) -> std::time::Duration {
    let next_day = now
        .date()
        .succ_opt()
        .unwrap_or(now.date())
        .and_time(NaiveTime::MIN);
    let wait = (next_day - now) + Duration::seconds(1);
    wait.to_std().unwrap_or(std::time::Duration::from_secs(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("2024-03-01T10:15:30.123456+0530", "2024-03-01T10:15:31+0530"; "fractional with offset")]
    #[test_case("2024-03-01T10:15:30.5", "2024-03-01T10:15:31+0000"; "fractional naive")]
    #[test_case("2024-03-01T10:15:30-0800", "2024-03-01T10:15:31-0800"; "offset")]
    #[test_case("2024-03-01T10:15:30", "2024-03-01T10:15:31+0000"; "naive")]
    #[test_case("2024-03-01T10:15+0000", "2024-03-01T10:15:01+0000"; "minutes with offset")]
    #[test_case("2024-03-01", "2024-03-01T00:00:01+0000"; "date only")]
    #[test_case("2024-03-01T23:59:59Z", "2024-03-02T00:00:00+0000"; "rfc3339 rolls over")]
    fn test_infer_and_format(input: &str, expected: &str) {
        let dt = infer_date(input).unwrap();
        assert_eq!(format_last_modified(dt), expected);
    }

    #[test]
    fn test_infer_date_rejects_garbage() {
        let err = infer_date("last tuesday").unwrap_err();
        assert!(matches!(err, Error::InvalidDate { .. }));
    }

    #[test]
    fn test_infer_date_keeps_offset() {
        let dt = infer_date("2013-11-18T02:17:40-0800").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), -8 * 3600);
    }

    #[test_case(2024, 2, 10, 29; "leap february")]
    #[test_case(2023, 2, 1, 28; "february")]
    #[test_case(2024, 12, 31, 31; "december")]
    #[test_case(2024, 4, 15, 30; "april")]
    fn test_last_day_of_month(year: i32, month: u32, day: u32, last: u32) {
        let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        let end = last_day_of_month(date);
        assert_eq!(end.day(), last);
        assert_eq!(end.month(), month);
    }

    #[test]
    fn test_duration_until_next_day() {
        let now = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(23, 59, 0)
            .unwrap();
        assert_eq!(
            duration_until_next_day(now),
            std::time::Duration::from_secs(61)
        );
    }
}
