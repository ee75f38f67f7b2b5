// Date utility functions
// Whole-day arithmetic shared by the layout pipeline and the drag controller

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{Datelike, Duration, NaiveDate};

/// Storage format, also the fallback when a display pattern cannot render.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Signed number of calendar days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Shift a date by a whole number of days.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// Monday of the week containing `date`.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday() as i64;
    date - Duration::days(offset)
}

/// Short weekday label used in week headers.
pub fn weekday_label(date: NaiveDate) -> &'static str {
    match date.weekday().num_days_from_monday() {
        0 => "Mon",
        1 => "Tue",
        2 => "Wed",
        3 => "Thu",
        4 => "Fri",
        5 => "Sat",
        _ => "Sun",
    }
}

/// Check that `format` is a strftime pattern chrono can parse.
pub fn validate_date_format(format: &str) -> Result<(), String> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(format!("Invalid date format '{}'", format));
    }
    Ok(())
}

/// Render one date, falling back to ISO when `format` cannot render it
/// (bad specifier, or a time field on a plain date).
pub fn format_date(date: NaiveDate, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(format)).is_err() {
        log::warn!("Date format '{}' failed, using {}", format, ISO_DATE_FORMAT);
        return date.format(ISO_DATE_FORMAT).to_string();
    }
    out
}

/// Human-readable date range, collapsing single-day ranges.
///
/// `format` is a chrono strftime pattern such as `%Y-%m-%d`.
pub fn format_range(start: NaiveDate, end: NaiveDate, format: &str) -> String {
    if start == end {
        format_date(start, format)
    } else {
        format!("{} ~ {}", format_date(start, format), format_date(end, format))
    }
}

/// Parse an ISO `YYYY-MM-DD` date as stored in the database.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT).ok()
}
