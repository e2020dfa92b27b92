//! Date and time utility functions
//!
//! The agency API exchanges dates as ISO strings, sometimes bare
//! (`2025-06-01`) and sometimes with a time part (`2025-06-01T00:00:00`).
//! These helpers parse both shapes and format them for display and for
//! pre-filling form inputs.

use chrono::format::{Item, StrftimeItems};
use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use std::fmt::Write;

/// Date format used for API query parameters and date inputs
pub const API_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format used for `datetime` inputs (transport departure/arrival)
pub const INPUT_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

const API_DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parse a date string in YYYY-MM-DD format to NaiveDate
pub fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date_str, API_DATE_FORMAT)
}

/// Parse the date part of an API date or datetime string
pub fn parse_api_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let date_part = value.get(..10).unwrap_or(value);
    parse_date(date_part).ok()
}

/// Parse an API datetime string, falling back to midnight for bare dates
pub fn parse_api_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    let without_zone = value.trim_end_matches('Z');
    API_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(without_zone, format).ok())
        .or_else(|| parse_api_date(value).and_then(|date| date.and_hms_opt(0, 0, 0)))
}

/// Format a NaiveDate to YYYY-MM-DD string
pub fn format_ymd(d: NaiveDate) -> String {
    d.format(API_DATE_FORMAT).to_string()
}

/// Current local date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Add a number of days to a YYYY-MM-DD date, returning YYYY-MM-DD
///
/// Returns `None` when the start date does not parse.
pub fn add_days(start: &str, days: i64) -> Option<String> {
    let start = parse_api_date(start)?;
    start.checked_add_signed(Duration::days(days)).map(format_ymd)
}

/// Render an API date with the configured display format
///
/// Unparseable input is returned unchanged, empty input renders as "-".
pub fn format_display_date(value: &str, format: &str) -> String {
    if value.trim().is_empty() {
        return "-".to_string();
    }
    match parse_api_date(value).and_then(|date| date.and_hms_opt(0, 0, 0)) {
        Some(datetime) => render(datetime, format).unwrap_or_else(|| value.to_string()),
        None => value.to_string(),
    }
}

/// Render an API datetime with the configured display format
pub fn format_display_datetime(value: &str, format: &str) -> String {
    if value.trim().is_empty() {
        return "-".to_string();
    }
    match parse_api_datetime(value) {
        Some(datetime) => render(datetime, format).unwrap_or_else(|| value.to_string()),
        None => value.to_string(),
    }
}

/// Whether a strftime format string only uses known specifiers
pub fn is_valid_format(format: &str) -> bool {
    !format.trim().is_empty() && !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

// Formatting can still fail for specifiers a naive datetime cannot supply (%z).
fn render(datetime: NaiveDateTime, format: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", datetime.format(format)).ok()?;
    Some(out)
}

/// Value used to pre-fill a date input from an API date
pub fn date_input_value(value: &str) -> String {
    value.split('T').next().unwrap_or_default().to_string()
}

/// Value used to pre-fill a datetime input from an API datetime
pub fn datetime_input_value(value: &str) -> String {
    match parse_api_datetime(value) {
        Some(datetime) => datetime.format(INPUT_DATETIME_FORMAT).to_string(),
        None => value.to_string(),
    }
}
