use chrono::{NaiveDate, Timelike};
use tourdesk::utils::datetime::{
    add_days, date_input_value, datetime_input_value, format_display_date, format_display_datetime, format_ymd,
    is_valid_format, parse_api_date, parse_api_datetime, parse_date,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_parse_date() {
    assert_eq!(parse_date("2025-06-01").unwrap(), ymd(2025, 6, 1));
    assert!(parse_date("01.06.2025").is_err());
    assert!(parse_date("2025-13-45").is_err());
}

#[test]
fn test_parse_api_date_accepts_time_part() {
    assert_eq!(parse_api_date("2025-06-01T10:30:00"), Some(ymd(2025, 6, 1)));
    assert_eq!(parse_api_date(" 2025-06-01 "), Some(ymd(2025, 6, 1)));
    assert_eq!(parse_api_date("soon"), None);
    assert_eq!(parse_api_date(""), None);
}

#[test]
fn test_parse_api_datetime_shapes() {
    let full = parse_api_datetime("2025-06-01T10:30:15").unwrap();
    assert_eq!((full.hour(), full.minute(), full.second()), (10, 30, 15));

    let fractional = parse_api_datetime("2025-06-01T10:30:15.1234567Z").unwrap();
    assert_eq!(fractional.second(), 15);

    let short = parse_api_datetime("2025-06-01T08:05").unwrap();
    assert_eq!((short.hour(), short.minute()), (8, 5));

    let bare = parse_api_datetime("2025-06-01").unwrap();
    assert_eq!(bare, ymd(2025, 6, 1).and_hms_opt(0, 0, 0).unwrap());

    assert_eq!(parse_api_datetime("not a date"), None);
}

#[test]
fn test_add_days() {
    assert_eq!(add_days("2025-07-01", 7).as_deref(), Some("2025-07-08"));
    assert_eq!(add_days("2024-02-28", 1).as_deref(), Some("2024-02-29"));
    assert_eq!(add_days("2025-12-31T00:00:00", 1).as_deref(), Some("2026-01-01"));
    assert_eq!(add_days("tomorrow", 1), None);
}

#[test]
fn test_format_ymd() {
    assert_eq!(format_ymd(ymd(2025, 1, 9)), "2025-01-09");
}

#[test]
fn test_format_display_date() {
    assert_eq!(format_display_date("2025-06-01T00:00:00", "%d.%m.%Y"), "01.06.2025");
    assert_eq!(format_display_date("   ", "%d.%m.%Y"), "-");
    assert_eq!(format_display_date("someday", "%d.%m.%Y"), "someday");
}

#[test]
fn test_format_display_datetime() {
    assert_eq!(
        format_display_datetime("2025-06-01T14:45:00", "%d.%m.%Y %H:%M"),
        "01.06.2025 14:45"
    );
    assert_eq!(format_display_datetime("", "%d.%m.%Y %H:%M"), "-");
    // %z needs an offset a naive datetime does not have
    assert_eq!(format_display_datetime("2025-06-01T14:45:00", "%z"), "2025-06-01T14:45:00");
}

#[test]
fn test_is_valid_format() {
    assert!(is_valid_format("%Y-%m-%d"));
    assert!(is_valid_format("%d.%m.%Y %H:%M"));
    assert!(!is_valid_format("%Q"));
    assert!(!is_valid_format("  "));
}

#[test]
fn test_input_values() {
    assert_eq!(date_input_value("2025-06-01T00:00:00"), "2025-06-01");
    assert_eq!(date_input_value("2025-06-01"), "2025-06-01");
    assert_eq!(date_input_value(""), "");

    assert_eq!(datetime_input_value("2025-06-01T09:15:30"), "2025-06-01T09:15");
    assert_eq!(datetime_input_value("2025-06-01"), "2025-06-01T00:00");
    assert_eq!(datetime_input_value("later"), "later");
}
