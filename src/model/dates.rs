//! Calendar helpers for story dates, the "together since" year and the
//! countdown target.
//!
//! Date-only strings are interpreted at midnight UTC, the same instant a
//! browser assigns to `new Date("YYYY-MM-DD")`.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::cmp::Ordering;

const ISO: &str = "%Y-%m-%d";

/// Formats accepted for story dates, tried in order.
const STORY_FORMATS: &[&str] = &[ISO, "%B %d, %Y", "%b %d, %Y", "%m/%d/%Y"];

/// Parse a `YYYY-MM-DD` date.
pub fn parse_iso(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), ISO).ok()
}

pub fn format_iso(date: NaiveDate) -> String {
    date.format(ISO).to_string()
}

/// Parse a story date, which may be ISO or written out (`March 15, 2020`).
pub fn parse_story_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    STORY_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Ordering used for the story strip: ascending date, unparseable dates last.
pub fn compare_story_dates(a: &str, b: &str) -> Ordering {
    match (parse_story_date(a), parse_story_date(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// `Mar 15, 2020`. Unparseable input is shown as typed.
pub fn format_short(s: &str) -> String {
    parse_story_date(s)
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| s.to_string())
}

/// `March 15, 2020`. Unparseable input is shown as typed.
pub fn format_long(s: &str) -> String {
    parse_story_date(s)
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| s.to_string())
}

/// Year component of a start date, if it parses.
pub fn year_of(s: &str) -> Option<i32> {
    parse_story_date(s).map(|d| d.year())
}

/// Milliseconds since the Unix epoch of midnight UTC on `date`.
pub fn midnight_utc_millis(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or_default()
}

/// UTC calendar year of an epoch-millisecond instant.
pub fn year_at(now_ms: i64) -> i32 {
    DateTime::<Utc>::from_timestamp_millis(now_ms)
        .map(|dt| dt.year())
        .unwrap_or(1970)
}

/// Same month/day in `year`. February 29 rolls over to March 1 when `year`
/// is not a leap year.
pub fn with_year(date: NaiveDate, year: i32) -> NaiveDate {
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_story_formats() {
        let d = NaiveDate::from_ymd_opt(2020, 3, 15).unwrap();
        assert_eq!(parse_story_date("2020-03-15"), Some(d));
        assert_eq!(parse_story_date("March 15, 2020"), Some(d));
        assert_eq!(parse_story_date("Mar 15, 2020"), Some(d));
        assert_eq!(parse_story_date("someday"), None);
    }

    #[test]
    fn short_and_long_labels() {
        assert_eq!(format_short("2021-07-22"), "Jul 22, 2021");
        assert_eq!(format_long("July 22, 2021"), "July 22, 2021");
        assert_eq!(format_long("2022-12-05"), "December 5, 2022");
        assert_eq!(format_short("our first trip"), "our first trip");
    }

    #[test]
    fn unparseable_dates_sort_last() {
        assert_eq!(compare_story_dates("2020-01-01", "soon"), Ordering::Less);
        assert_eq!(compare_story_dates("soon", "2020-01-01"), Ordering::Greater);
        assert_eq!(compare_story_dates("2021-01-01", "March 15, 2020"), Ordering::Greater);
    }

    #[test]
    fn midnight_is_utc() {
        let d = NaiveDate::from_ymd_opt(1970, 1, 2).unwrap();
        assert_eq!(midnight_utc_millis(d), 86_400_000);
        assert_eq!(year_at(86_400_000), 1970);
    }

    #[test]
    fn leap_day_rolls_to_march_first() {
        let leap = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(with_year(leap, 2027), NaiveDate::from_ymd_opt(2027, 3, 1).unwrap());
        assert_eq!(with_year(leap, 2028), NaiveDate::from_ymd_opt(2028, 2, 29).unwrap());
    }
}
