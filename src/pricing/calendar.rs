//! Calendar helpers for miles validity.
//!
//! Pure functions: month arithmetic with day-of-month clamping and
//! exchange-date parsing.

use chrono::{Datelike, NaiveDate};

/// Date format accepted for exchange dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Proleptic Gregorian leap year rule
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` (1-12) of `year`
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Advance `date` by `months` calendar months.
///
/// The day of month is clamped to the last day of the target month, so
/// Jan 31 + 1 month is Feb 28 (or 29), never a date in March. Returns `None`
/// only if the result falls outside chrono's representable range.
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    let zero_based = date.month0() as i64 + months as i64;
    let year = i32::try_from(date.year() as i64 + zero_based / 12).ok()?;
    let month = (zero_based % 12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse an exchange date in `YYYY-MM-DD` form
pub fn parse_exchange_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).ok()
}
