//! Lenient date parsing and first-valid date selection.
//!
//! Candidate order expresses priority: `select_valid_date` returns the first
//! candidate that parses, never the earliest or latest one.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use regex::Regex;

/// Date-time layouts carrying an explicit offset.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%dT%H:%M%:z",
    "%a %b %d %Y %H:%M:%S GMT%z",
];

/// Date-time layouts without an offset, read as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only layouts, read as midnight UTC.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Time followed by a `Z` designator.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ZULU_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*\d{2}:\d{2}(?::\d{2}(?:\.\d+)?)?)[Zz]$").expect("valid regex")
});

/// Time followed by an hours-only offset such as `+00`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SHORT_OFFSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*\d{2}:\d{2}(?::\d{2}(?:\.\d+)?)?[+-]\d{2})$").expect("valid regex")
});

/// Trailing time-zone name, as in `GMT+0000 (Coordinated Universal Time)`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ZONE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)$").expect("valid regex"));

/// Reduced ISO-8601 forms: `YYYY` and `YYYY-MM`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static REDUCED_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})(?:-(\d{2}))?$").expect("valid regex"));

/// Parse a date string in any of the common textual layouts.
///
/// Returns `None` for unparseable text and for the Unix epoch itself,
/// which upstream engines use as a "no date" marker.
///
/// # Examples
/// ```
/// use geoportal_dcat::date::parse_lenient;
///
/// assert!(parse_lenient("2023-01-05").is_some());
/// assert!(parse_lenient("2023-01-05T10:00Z").is_some());
/// assert!(parse_lenient("Thu, 05 Jan 2023 10:00:00 GMT").is_some());
/// assert!(parse_lenient("not-a-date").is_none());
/// assert!(parse_lenient("1970-01-01T00:00:00Z").is_none());
/// ```
#[must_use]
pub fn parse_lenient(text: &str) -> Option<DateTime<Utc>> {
    let text = normalize_offset(text.trim());
    if text.is_empty() {
        return None;
    }

    let parsed = parse_with_offset(&text)
        .or_else(|| parse_naive_datetime(&text))
        .or_else(|| parse_date_only(&text))
        .or_else(|| parse_reduced(&text))?;

    (parsed.timestamp_millis() != 0).then_some(parsed)
}

/// Rewrite `Z`, `+hh` and zone-name suffixes into a `+hh:mm` offset.
fn normalize_offset(text: &str) -> String {
    let text = ZONE_NAME.replace(text, "");
    if let Some(caps) = ZULU_SUFFIX.captures(&text) {
        return format!("{}+00:00", &caps[1]);
    }
    if SHORT_OFFSET.is_match(&text) {
        return format!("{text}:00");
    }
    text.into_owned()
}

fn parse_with_offset(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }
    OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_naive_datetime(text: &str) -> Option<DateTime<Utc>> {
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn parse_date_only(text: &str) -> Option<DateTime<Utc>> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `YYYY` and `YYYY-MM`, read as the first day of the year or month.
fn parse_reduced(text: &str) -> Option<DateTime<Utc>> {
    let caps = REDUCED_DATE.captures(text)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 1,
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Format as `YYYY-MM-DDTHH:MM:SS.sssZ`.
#[must_use]
pub fn to_iso_string(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Pick the first parseable candidate, in the given order.
///
/// # Examples
/// ```
/// use geoportal_dcat::date::select_valid_date;
///
/// assert_eq!(
///     select_valid_date(&[None, Some("garbage"), Some("2021-06-01T00:00:00Z")]),
///     Some("2021-06-01T00:00:00.000Z".to_string())
/// );
/// assert_eq!(select_valid_date(&[]), None);
/// ```
#[must_use]
pub fn select_valid_date(candidates: &[Option<&str>]) -> Option<String> {
    candidates
        .iter()
        .flatten()
        .find_map(|candidate| parse_lenient(candidate))
        .map(|dt| to_iso_string(&dt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_valid_wins_not_earliest() {
        assert_eq!(
            select_valid_date(&[Some("2023-01-05"), Some("2022-01-01")]),
            Some("2023-01-05T00:00:00.000Z".to_string())
        );
        assert_eq!(
            select_valid_date(&[Some("2022-01-01"), Some("2023-01-05")]),
            Some("2022-01-01T00:00:00.000Z".to_string())
        );
    }

    #[test]
    fn test_no_valid_candidates() {
        assert_eq!(select_valid_date(&[None, Some("not-a-date")]), None);
        assert_eq!(select_valid_date(&[None, None]), None);
        assert_eq!(select_valid_date(&[]), None);
    }

    #[test]
    fn test_skips_invalid_then_takes_next() {
        assert_eq!(
            select_valid_date(&[Some(""), Some("2025-13-01"), Some("2020-02-29")]),
            Some("2020-02-29T00:00:00.000Z".to_string())
        );
    }

    #[test]
    fn test_epoch_is_discarded() {
        assert_eq!(
            select_valid_date(&[Some("1970-01-01"), Some("2001-09-09")]),
            Some("2001-09-09T00:00:00.000Z".to_string())
        );
    }

    #[test]
    fn test_offset_is_normalized_to_utc() {
        assert_eq!(
            select_valid_date(&[Some("2021-06-01T02:30:00+02:00")]),
            Some("2021-06-01T00:30:00.000Z".to_string())
        );
    }

    #[test]
    fn test_fractional_seconds_truncated_to_millis() {
        assert_eq!(
            select_valid_date(&[Some("2021-06-01T12:00:00.123456Z")]),
            Some("2021-06-01T12:00:00.123Z".to_string())
        );
    }

    #[test]
    fn test_lenient_layouts() {
        let expected = "2023-01-05T00:00:00.000Z";
        for text in [
            "2023-01-05",
            "2023/01/05",
            "2023-01-05T00:00:00",
            "2023-01-05 00:00",
            "2023-01-05T00:00:00+0000",
            "January 05, 2023",
            "Jan 5, 2023",
            "5 January 2023",
            "Thu, 05 Jan 2023 00:00:00 +0000",
            "01/05/2023",
            "2023-01-05T00:00Z",
            "2023-01-05T00:00:00+00",
            "Thu Jan 05 2023 00:00:00 GMT+0000",
            "Thu Jan 05 2023 00:00:00 GMT+0000 (Coordinated Universal Time)",
        ] {
            let parsed = parse_lenient(text).map(|dt| to_iso_string(&dt));
            assert_eq!(parsed.as_deref(), Some(expected), "layout {text:?}");
        }
    }

    #[test]
    fn test_reduced_iso_forms() {
        assert_eq!(
            parse_lenient("2023").map(|dt| to_iso_string(&dt)).as_deref(),
            Some("2023-01-01T00:00:00.000Z")
        );
        assert_eq!(
            parse_lenient("2023-01").map(|dt| to_iso_string(&dt)).as_deref(),
            Some("2023-01-01T00:00:00.000Z")
        );
        assert!(parse_lenient("2023-13").is_none());
    }

    #[test]
    fn test_zulu_and_short_offsets() {
        let expected = Some("2023-01-05T10:00:00.000Z");
        for text in [
            "2023-01-05T10:00Z",
            "2023-01-05T10:00:00+00",
            "2023-01-05T12:00:00+02",
            "2023-01-05T10:00:00.5Z",
        ] {
            let parsed = parse_lenient(text).map(|dt| to_iso_string(&dt));
            let expected = if text.ends_with(".5Z") {
                Some("2023-01-05T10:00:00.500Z")
            } else {
                expected
            };
            assert_eq!(parsed.as_deref(), expected, "layout {text:?}");
        }
    }

    #[test]
    fn test_minute_precision_zulu_wins_over_later_candidate() {
        assert_eq!(
            select_valid_date(&[Some("2023-01-05T10:00Z"), Some("2022-01-01")]),
            Some("2023-01-05T10:00:00.000Z".to_string())
        );
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert!(parse_lenient("  2023-01-05  ").is_some());
        assert!(parse_lenient("   ").is_none());
    }
}
