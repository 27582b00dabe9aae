use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::table::CellValue;

/// `Date(year,month,day)` with a zero-based month, as emitted by gviz.
static SENTINEL_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Date\((\d+),(\d+),(\d+)\)").expect("sentinel date pattern"));

/// Display format used for date cells.
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Generic text formats, tried in order after the display format.
const TEXT_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const TEXT_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// True when the text is a gviz sentinel date, valid or not.
pub fn is_sentinel(s: &str) -> bool {
    SENTINEL_DATE.is_match(s)
}

/// Parses `Date(y,m,d)`.
///
/// Out-of-range months and days roll over into the following months, so
/// `Date(2024,12,1)` is 2025-01-01 and `Date(2023,1,29)` is 2023-03-01.
/// `None` when the text is not a sentinel or the result leaves chrono's range.
pub fn parse_sentinel(s: &str) -> Option<NaiveDate> {
    let caps = SENTINEL_DATE.captures(s)?;
    let year: i64 = caps[1].parse().ok()?;
    let month: i64 = caps[2].parse().ok()?;
    let day: i64 = caps[3].parse().ok()?;

    let year = i32::try_from(year.checked_add(month / 12)?).ok()?;
    let first = NaiveDate::from_ymd_opt(year, (month % 12) as u32 + 1, 1)?;
    first.checked_add_signed(Duration::try_days(day - 1)?)
}

/// Parses a free-form date string. `dd/mm/yyyy` wins over `mm/dd/yyyy`.
pub fn parse_text_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, DISPLAY_FORMAT) {
        return Some(d);
    }
    if let Some(d) = TEXT_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    TEXT_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

/// Date of a raw cell value.
///
/// Text starting with `Date(` is only ever read as a sentinel. Numbers are
/// milliseconds since the Unix epoch (UTC). Booleans and empty cells never
/// parse.
pub fn parse_date_value(value: &CellValue) -> Option<NaiveDate> {
    match value {
        CellValue::Text(s) if s.starts_with("Date(") => parse_sentinel(s),
        CellValue::Text(s) => parse_text_date(s),
        CellValue::Number(n) if n.is_finite() => {
            DateTime::from_timestamp_millis(*n as i64).map(|dt| dt.date_naive())
        }
        _ => None,
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Whole days from `today` until `due`; negative when overdue.
pub fn days_until(due: NaiveDate, today: NaiveDate) -> i64 {
    due.signed_duration_since(today).num_days()
}
