//! Date parsing and display formats.
//!
//! Front-matter dates are free-form strings. Everything downstream works with
//! `DateTime<Utc>`; date-only values are UTC midnight so that the same source
//! date always yields the same sitemap `lastmod` and RSS `pubDate`, regardless
//! of the machine's timezone.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse a front-matter date.
///
/// Accepted forms, tried in order:
/// - RFC 3339 (`2025-01-15T09:30:00+02:00`, `2025-01-15T07:30:00Z`)
/// - naive date-time (`2025-01-15T09:30:00`, `2025-01-15 09:30:00`, optional
///   fractional seconds or no seconds), read as UTC
/// - date (`2025-01-15`)
/// - month (`2025-01`), read as the first of the month
/// - year (`2025`), read as January 1st
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|n| n.and_utc());
    }
    let date = if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok().and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
    } else {
        NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").ok()
    };
    date.and_then(|d| d.and_hms_opt(0, 0, 0)).map(|n| n.and_utc())
}

/// `2025-01-15T00:00:00.000Z`
pub fn iso_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// `2025-01-15`
pub fn iso_date(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

/// `Wed, 15 Jan 2025 00:00:00 GMT`, as RSS readers expect.
pub fn rfc2822(dt: &DateTime<Utc>) -> String {
    dt.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// `Jan 5, 2025`, no zero padding
pub fn display_day(dt: &DateTime<Utc>) -> String {
    dt.format("%b %-d, %Y").to_string()
}

/// `Jan 2025`
pub fn display_month(dt: &DateTime<Utc>) -> String {
    dt.format("%b %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ymd(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn parses_plain_date_as_utc_midnight() {
        assert_eq!(parse_date("2025-01-15"), Some(ymd(2025, 1, 15)));
    }

    #[test]
    fn parses_month_as_first_day() {
        assert_eq!(parse_date("2024-05"), Some(ymd(2024, 5, 1)));
    }

    #[test]
    fn parses_bare_year_as_january_first() {
        assert_eq!(parse_date("2025"), Some(ymd(2025, 1, 1)));
        assert_eq!(parse_date("20x5"), None);
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let dt = parse_date("2025-01-15T09:30:00+02:00").unwrap();
        assert_eq!(iso_timestamp(&dt), "2025-01-15T07:30:00.000Z");
    }

    #[test]
    fn parses_naive_datetime_with_space() {
        let dt = parse_date("2025-01-15 18:05:00").unwrap();
        assert_eq!(iso_timestamp(&dt), "2025-01-15T18:05:00.000Z");
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_date("next tuesday"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2025-13-01"), None);
    }

    #[test]
    fn formats() {
        let dt = ymd(2025, 1, 5);
        assert_eq!(iso_timestamp(&dt), "2025-01-05T00:00:00.000Z");
        assert_eq!(iso_date(&dt), "2025-01-05");
        assert_eq!(rfc2822(&dt), "Sun, 05 Jan 2025 00:00:00 GMT");
        assert_eq!(display_day(&dt), "Jan 5, 2025");
        assert_eq!(display_month(&dt), "Jan 2025");
    }
}
