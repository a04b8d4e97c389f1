use chrono::{Duration, NaiveDate, NaiveDateTime};

/// A timestamp text layout accepted from the task store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// Full date and time, parsed as `NaiveDateTime`
    DateTime(&'static str),
    /// Calendar date only, resolved to midnight
    Date(&'static str),
}

/// Accepted formats, tried in order. The first one that parses wins.
///
/// `%.f` makes fractional seconds optional, so `2024-03-01 09:30:00` and
/// `2024-03-01 09:30:00.123456` both match the first entry.
pub const ACCEPTED_FORMATS: &[DateFormat] = &[
    DateFormat::DateTime("%Y-%m-%d %H:%M:%S%.f"),
    DateFormat::DateTime("%Y-%m-%dT%H:%M:%S%.f"),
    DateFormat::DateTime("%Y-%m-%d %H:%M"),
    DateFormat::Date("%Y-%m-%d"),
];

const SECONDS_PER_DAY: i64 = 86_400;

impl DateFormat {
    fn parse(&self, raw: &str) -> Option<NaiveDateTime> {
        match self {
            DateFormat::DateTime(fmt) => NaiveDateTime::parse_from_str(raw, fmt).ok(),
            DateFormat::Date(fmt) => NaiveDate::parse_from_str(raw, fmt)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0)),
        }
    }
}

/// Parse a stored timestamp string.
///
/// Returns `None` for empty or unrecognized input; callers treat that the
/// same as a missing field.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let parsed = ACCEPTED_FORMATS.iter().find_map(|format| format.parse(raw));
    if parsed.is_none() {
        tracing::trace!(value = raw, "unrecognized timestamp, treating as absent");
    }
    parsed
}

/// Number of whole days in a span, rounding toward negative infinity.
///
/// A follow-up due twelve hours ago is `-1` days away, not `0`.
pub fn whole_days(span: Duration) -> i64 {
    span.num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// Whole days from `from` until `to` (negative when `to` is earlier).
pub fn days_between(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    whole_days(to - from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_parse_date_time_with_space() {
        assert_eq!(
            parse_timestamp("2024-03-01 09:30:15"),
            Some(at(2024, 3, 1, 9, 30, 15))
        );
    }

    #[test]
    fn test_parse_date_time_with_fraction() {
        let parsed = parse_timestamp("2024-03-01 09:30:15.250").unwrap();
        assert_eq!(parsed.date(), at(2024, 3, 1, 0, 0, 0).date());
        assert_eq!(parsed.nanosecond(), 250_000_000);
    }

    #[test]
    fn test_parse_iso_t_separator() {
        assert_eq!(
            parse_timestamp("2024-03-01T09:30:15"),
            Some(at(2024, 3, 1, 9, 30, 15))
        );
    }

    #[test]
    fn test_parse_without_seconds() {
        assert_eq!(
            parse_timestamp("2024-03-01 09:30"),
            Some(at(2024, 3, 1, 9, 30, 0))
        );
    }

    #[test]
    fn test_parse_date_only_is_midnight() {
        assert_eq!(parse_timestamp("2024-03-01"), Some(at(2024, 3, 1, 0, 0, 0)));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_timestamp("  2024-03-01 "), Some(at(2024, 3, 1, 0, 0, 0)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("   "), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("03/01/2024"), None);
        assert_eq!(parse_timestamp("2024-13-01"), None);
        assert_eq!(parse_timestamp("2024-02-30 10:00:00"), None);
    }

    #[test]
    fn test_whole_days_floors_positive() {
        assert_eq!(whole_days(Duration::hours(47)), 1);
        assert_eq!(whole_days(Duration::hours(48)), 2);
        assert_eq!(whole_days(Duration::zero()), 0);
    }

    #[test]
    fn test_whole_days_floors_negative() {
        assert_eq!(whole_days(Duration::hours(-1)), -1);
        assert_eq!(whole_days(Duration::hours(-24)), -1);
        assert_eq!(whole_days(Duration::hours(-25)), -2);
    }

    #[test]
    fn test_days_between() {
        let now = at(2024, 3, 10, 12, 0, 0);
        assert_eq!(days_between(at(2024, 3, 1, 12, 0, 0), now), 9);
        assert_eq!(days_between(now, at(2024, 3, 12, 11, 0, 0)), 1);
        assert_eq!(days_between(now, at(2024, 3, 10, 0, 0, 0)), -1);
    }
}
