//! Date-string parsing and URL date-pattern matching.
//!
//! Two narrow collaborators used by the extractor:
//! - [`match_strict_date`]: finds a strict `YYYY/MM/DD`-style substring in an
//!   article URL. URL-embedded dates are set once at publication and rarely
//!   altered, which makes them the most reliable signal in the system.
//! - [`parse_date_string`]: turns a raw date string into a timestamp, or
//!   fails quietly. It never panics and never surfaces an error; callers
//!   treat `None` as "no candidate".
//!
//! Strings carrying an explicit UTC offset keep it. Offset-less strings are
//! pinned to +00:00, and date-only strings become midnight. Ambiguous
//! all-numeric forms are read month-first (`04/15/2023` is April 15th).

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a date embedded in a URL path: a 1900–2099 year, month, and day
/// joined by `/`, `-`, `_`, or `.`, bounded so digits inside longer numbers
/// don't match.
static STRICT_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:^|[^\d])((?:19|20)\d{2}[/\-_.](?:0?[1-9]|1[0-2])[/\-_.](?:0?[1-9]|[12]\d|3[01]))(?:[^\d]|$)",
    )
    .unwrap()
});

/// Datetime formats without a UTC offset, tried after RFC 3339 / RFC 2822.
const NAIVE_DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y%m%dT%H%M%S",
];

/// Date-only formats. Year-first forms mirror the URL pattern's separators;
/// `%m/%d/%Y` is the pinned month-first reading of ambiguous numeric dates.
const DATE_FORMATS: [&str; 9] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y_%m_%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%Y%m%d",
];

/// Extract a date-looking substring from a URL, if one exists.
///
/// # Arguments
///
/// * `url` - The article URL to scan
///
/// # Returns
///
/// The matched date substring (e.g. `"2023/04/15"`), or `None`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     match_strict_date("https://lite.cnn.com/2023/04/15/headline"),
///     Some("2023/04/15")
/// );
/// ```
pub fn match_strict_date(url: &str) -> Option<&str> {
    STRICT_DATE_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Parse a raw date string into a timestamp.
///
/// Tries RFC 3339, then RFC 2822, then a fixed ladder of offset-less
/// datetime and date-only formats. Malformed, overflowed, or non-date input
/// yields `None`; no failure ever escapes this function.
///
/// # Arguments
///
/// * `raw` - The candidate date string, surrounding whitespace tolerated
///
/// # Returns
///
/// The parsed timestamp, or `None` if no format matched.
pub fn parse_date_string(raw: &str) -> Option<DateTime<FixedOffset>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt);
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(pin_utc(naive));
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            let naive = date.and_hms_opt(0, 0, 0)?;
            return Some(pin_utc(naive));
        }
    }

    None
}

/// Pin an offset-less timestamp to +00:00.
fn pin_utc(naive: NaiveDateTime) -> DateTime<FixedOffset> {
    DateTime::from_naive_utc_and_offset(naive, FixedOffset::east_opt(0).unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_match_slash_separated_url() {
        assert_eq!(
            match_strict_date("https://lite.cnn.com/2023/04/15/some-headline"),
            Some("2023/04/15")
        );
    }

    #[test]
    fn test_match_dash_separated_url() {
        assert_eq!(
            match_strict_date("https://example.com/news/2023-04-15-headline"),
            Some("2023-04-15")
        );
    }

    #[test]
    fn test_match_rejects_bare_year() {
        assert_eq!(match_strict_date("https://example.com/2023/headline"), None);
    }

    #[test]
    fn test_match_rejects_out_of_range_month() {
        assert_eq!(
            match_strict_date("https://example.com/2023/13/05/headline"),
            None
        );
    }

    #[test]
    fn test_match_rejects_out_of_range_day() {
        assert_eq!(
            match_strict_date("https://example.com/2023/04/32/headline"),
            None
        );
    }

    #[test]
    fn test_match_rejects_digits_run_together() {
        // A year glued to more digits is some other number, not a date.
        assert_eq!(match_strict_date("https://example.com/id/12023/04/15"), None);
    }

    #[test]
    fn test_match_no_date() {
        assert_eq!(
            match_strict_date("https://example.com/politics/some-headline"),
            None
        );
    }

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_date_string("2024-01-02T08:30:00+02:00").unwrap();
        assert_eq!(dt.hour(), 8);
        assert_eq!(dt.offset().local_minus_utc(), 2 * 3600);
    }

    #[test]
    fn test_parse_rfc2822() {
        let dt = parse_date_string("Tue, 02 Jan 2024 08:30:00 GMT").unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.month(), 1);
        assert_eq!(dt.day(), 2);
    }

    #[test]
    fn test_parse_naive_datetime() {
        let dt = parse_date_string("2024-01-02T08:30:00").unwrap();
        assert_eq!(dt.hour(), 8);
        assert_eq!(dt.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_parse_date_only_is_midnight() {
        let dt = parse_date_string("2023-12-01").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2023, 12, 1));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (0, 0, 0));
    }

    #[test]
    fn test_parse_url_match_separators() {
        assert!(parse_date_string("2023/04/15").is_some());
        assert!(parse_date_string("2023.04.15").is_some());
        assert!(parse_date_string("2023_04_15").is_some());
    }

    #[test]
    fn test_parse_month_first_pinned() {
        // Ambiguous numeric forms read month-first: March 4th, not April 3rd.
        let dt = parse_date_string("03/04/2023").unwrap();
        assert_eq!((dt.month(), dt.day()), (3, 4));
    }

    #[test]
    fn test_parse_month_names() {
        let dt = parse_date_string("April 15, 2023").unwrap();
        assert_eq!((dt.month(), dt.day()), (4, 15));
        let dt = parse_date_string("15 April 2023").unwrap();
        assert_eq!((dt.month(), dt.day()), (4, 15));
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_date_string("not a date"), None);
        assert_eq!(parse_date_string(""), None);
        assert_eq!(parse_date_string("   "), None);
        assert_eq!(parse_date_string("2023-99-99"), None);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert!(parse_date_string("  2023-12-01  ").is_some());
    }
}
