//! Calendar arithmetic: field shifts, month/year boundaries, weekday and
//! month-count queries.
//!
//! Every function takes its date by reference and returns a new value. The
//! boundary functions come in two shapes:
//!
//! - a date form (`first_day_of_next_month(&date, n, truncate)`) returning
//!   `Result<NaiveDateTime>`, failing only when the result leaves chrono's
//!   representable range;
//! - a string form (`first_day_of_next_month_str(input, pattern, n)`) that
//!   parses with `pattern`, computes, and formats the result with the same
//!   pattern. An input that does not parse yields `Ok(None)`.
//!
//! # Month-End Pinning
//!
//! Month and year shifts keep the day of month and pin it to the target
//! month's length when the day does not exist there:
//!
//! ```
//! use calendar_engine::{ops, CalendarField};
//! use chrono::NaiveDate;
//!
//! let jan31 = NaiveDate::from_ymd_opt(2017, 1, 31).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let shifted = ops::add(&jan31, CalendarField::Month, 1).unwrap();
//! assert_eq!(shifted.date(), NaiveDate::from_ymd_opt(2017, 2, 28).unwrap());
//! ```

use chrono::{Datelike, Local, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::codec::parse_or_none;
use crate::error::{CalendarError, Result};
use crate::field::CalendarField;
use crate::pattern::{days_in_month, Pattern};

// ── add ─────────────────────────────────────────────────────────────────────

/// Shift `date` by `amount` units of `field`; negative amounts go backward.
///
/// Year and month shifts pin the day to the target month's length
/// (2024-02-29 + 1 year = 2025-02-28). Weeks are seven days; sub-day fields
/// are exact durations.
///
/// # Errors
///
/// Returns [`CalendarError::OutOfRange`] if the result cannot be represented.
pub fn add(date: &NaiveDateTime, field: CalendarField, amount: i32) -> Result<NaiveDateTime> {
    let amount = i64::from(amount);
    let shifted = match field {
        CalendarField::Year => return shift_months(date, amount * 12),
        CalendarField::Month => return shift_months(date, amount),
        CalendarField::Week => TimeDelta::try_weeks(amount),
        CalendarField::Day => TimeDelta::try_days(amount),
        CalendarField::Hour => TimeDelta::try_hours(amount),
        CalendarField::Minute => TimeDelta::try_minutes(amount),
        CalendarField::Second => TimeDelta::try_seconds(amount),
        CalendarField::Millisecond => TimeDelta::try_milliseconds(amount),
    }
    .and_then(|delta| date.checked_add_signed(delta));

    shifted.ok_or_else(|| out_of_range(date, &format!("{amount:+} {field}")))
}

/// String form of [`add`]: parse, shift, and format with the same pattern.
///
/// ```
/// use calendar_engine::{ops, CalendarField};
///
/// let out = ops::add_str("2017-09-13", "yyyy-MM-dd", CalendarField::Day, 5).unwrap();
/// assert_eq!(out.as_deref(), Some("2017-09-18"));
/// ```
pub fn add_str(
    input: &str,
    pattern: &str,
    field: CalendarField,
    amount: i32,
) -> Result<Option<String>> {
    map_date_str(input, pattern, |date| add(date, field, amount))
}

// ── day of week ─────────────────────────────────────────────────────────────

/// Day of week with 1 = Monday .. 7 = Sunday.
pub fn day_of_week(date: &NaiveDateTime) -> u32 {
    // Shift the Sunday = 1 numbering down by one; Sunday lands on 0 and wraps to 7.
    match date.weekday().number_from_sunday() - 1 {
        0 => 7,
        n => n,
    }
}

/// [`day_of_week`] for the current local date.
pub fn day_of_week_today() -> u32 {
    day_of_week(&Local::now().naive_local())
}

// ── month boundaries ────────────────────────────────────────────────────────

/// First day of the month containing `date`.
///
/// The time of day is kept unless `truncate` is set, in which case it is
/// reset to midnight.
pub fn first_day_of_month(date: &NaiveDateTime, truncate: bool) -> Result<NaiveDateTime> {
    first_day_of_next_month(date, 0, truncate)
}

/// Last day of the month containing `date`.
pub fn last_day_of_month(date: &NaiveDateTime, truncate: bool) -> Result<NaiveDateTime> {
    last_day_of_next_month(date, 0, truncate)
}

/// First day of the month `n` months after `date` (before it when `n` is
/// negative).
pub fn first_day_of_next_month(
    date: &NaiveDateTime,
    n: i32,
    truncate: bool,
) -> Result<NaiveDateTime> {
    let shifted = add(date, CalendarField::Month, n)?;
    let pinned = shifted
        .with_day(1)
        .ok_or_else(|| out_of_range(&shifted, "first day of month"))?;
    Ok(truncate_if(pinned, truncate))
}

/// Last day of the month `n` months after `date`.
///
/// The month is shifted before the day is pinned, so the result always uses
/// the target month's own length: 2017-01-31 with `n = 1` gives 2017-02-28.
pub fn last_day_of_next_month(
    date: &NaiveDateTime,
    n: i32,
    truncate: bool,
) -> Result<NaiveDateTime> {
    let shifted = add(date, CalendarField::Month, n)?;
    let last = days_in_month(shifted.date());
    let pinned = shifted
        .with_day(last)
        .ok_or_else(|| out_of_range(&shifted, "last day of month"))?;
    Ok(truncate_if(pinned, truncate))
}

/// String form of [`first_day_of_month`].
pub fn first_day_of_month_str(input: &str, pattern: &str) -> Result<Option<String>> {
    first_day_of_next_month_str(input, pattern, 0)
}

/// String form of [`last_day_of_month`].
pub fn last_day_of_month_str(input: &str, pattern: &str) -> Result<Option<String>> {
    last_day_of_next_month_str(input, pattern, 0)
}

/// String form of [`first_day_of_next_month`].
///
/// ```
/// use calendar_engine::ops;
///
/// let out = ops::first_day_of_next_month_str("2017-01-31", "yyyy-MM-dd", 1).unwrap();
/// assert_eq!(out.as_deref(), Some("2017-02-01"));
/// ```
pub fn first_day_of_next_month_str(input: &str, pattern: &str, n: i32) -> Result<Option<String>> {
    map_date_str(input, pattern, |date| first_day_of_next_month(date, n, false))
}

/// String form of [`last_day_of_next_month`].
///
/// ```
/// use calendar_engine::ops;
///
/// let out = ops::last_day_of_next_month_str("2017-01-31", "yyyy-MM-dd", 1).unwrap();
/// assert_eq!(out.as_deref(), Some("2017-02-28"));
/// ```
pub fn last_day_of_next_month_str(input: &str, pattern: &str, n: i32) -> Result<Option<String>> {
    map_date_str(input, pattern, |date| last_day_of_next_month(date, n, false))
}

// ── year boundaries ─────────────────────────────────────────────────────────

/// January 1 of the year containing `date`.
pub fn first_day_of_year(date: &NaiveDateTime, truncate: bool) -> Result<NaiveDateTime> {
    first_day_of_next_year(date, 0, truncate)
}

/// December 31 of the year containing `date`.
pub fn last_day_of_year(date: &NaiveDateTime, truncate: bool) -> Result<NaiveDateTime> {
    last_day_of_next_year(date, 0, truncate)
}

/// January 1 of the year `n` years after `date`.
pub fn first_day_of_next_year(
    date: &NaiveDateTime,
    n: i32,
    truncate: bool,
) -> Result<NaiveDateTime> {
    pin_day_of_year(date, n, 1, 1, truncate)
}

/// December 31 of the year `n` years after `date`.
pub fn last_day_of_next_year(
    date: &NaiveDateTime,
    n: i32,
    truncate: bool,
) -> Result<NaiveDateTime> {
    pin_day_of_year(date, n, 12, 31, truncate)
}

/// String form of [`first_day_of_year`].
pub fn first_day_of_year_str(input: &str, pattern: &str) -> Result<Option<String>> {
    first_day_of_next_year_str(input, pattern, 0)
}

/// String form of [`last_day_of_year`].
pub fn last_day_of_year_str(input: &str, pattern: &str) -> Result<Option<String>> {
    last_day_of_next_year_str(input, pattern, 0)
}

/// String form of [`first_day_of_next_year`].
pub fn first_day_of_next_year_str(input: &str, pattern: &str, n: i32) -> Result<Option<String>> {
    map_date_str(input, pattern, |date| first_day_of_next_year(date, n, false))
}

/// String form of [`last_day_of_next_year`].
pub fn last_day_of_next_year_str(input: &str, pattern: &str, n: i32) -> Result<Option<String>> {
    map_date_str(input, pattern, |date| last_day_of_next_year(date, n, false))
}

/// `"{year}-01-01"`. The year is not validated.
pub fn first_day_by_year(year: &str) -> String {
    format!("{year}-01-01")
}

/// `"{year}-12-31"`. The year is not validated.
pub fn last_day_by_year(year: &str) -> String {
    format!("{year}-12-31")
}

// ── month difference ────────────────────────────────────────────────────────

/// Inclusive count of calendar months spanned by two dates.
///
/// Days are ignored and the order of the arguments does not matter. Two
/// dates in the same month count as 1, so the result suits "months ×
/// monthly fee" style totals.
///
/// ```
/// use calendar_engine::ops::month_diff;
/// use chrono::NaiveDate;
///
/// let jan = NaiveDate::from_ymd_opt(2017, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let mar = NaiveDate::from_ymd_opt(2017, 3, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// assert_eq!(month_diff(&jan, &mar), 3);
/// assert_eq!(month_diff(&jan, &jan), 1);
/// ```
pub fn month_diff(date1: &NaiveDateTime, date2: &NaiveDateTime) -> u32 {
    let years = i64::from(date2.year()) - i64::from(date1.year());
    let months = i64::from(date2.month()) - i64::from(date1.month());
    // chrono's year range keeps this far below u32::MAX.
    ((12 * years + months).unsigned_abs() + 1) as u32
}

/// String form of [`month_diff`]; both inputs share `pattern`.
///
/// # Errors
///
/// A parse failure is returned as [`CalendarError::Parse`] rather than a
/// sentinel, since every `u32` is a legitimate answer.
pub fn month_diff_str(input1: &str, input2: &str, pattern: &str) -> Result<u32> {
    let pattern = Pattern::compile(pattern)?;
    let date1 = pattern.parse(input1)?;
    let date2 = pattern.parse(input2)?;
    Ok(month_diff(&date1, &date2))
}

// ── Internal helpers ────────────────────────────────────────────────────────

fn shift_months(date: &NaiveDateTime, months: i64) -> Result<NaiveDateTime> {
    let shifted = u32::try_from(months.unsigned_abs())
        .ok()
        .map(Months::new)
        .and_then(|magnitude| {
            if months >= 0 {
                date.checked_add_months(magnitude)
            } else {
                date.checked_sub_months(magnitude)
            }
        });
    shifted.ok_or_else(|| out_of_range(date, &format!("{months:+} months")))
}

fn pin_day_of_year(
    date: &NaiveDateTime,
    n: i32,
    month: u32,
    day: u32,
    truncate: bool,
) -> Result<NaiveDateTime> {
    let shifted = add(date, CalendarField::Year, n)?;
    let pinned = NaiveDate::from_ymd_opt(shifted.year(), month, day)
        .map(|d| d.and_time(shifted.time()))
        .ok_or_else(|| out_of_range(&shifted, "year boundary"))?;
    Ok(truncate_if(pinned, truncate))
}

fn truncate_if(date: NaiveDateTime, truncate: bool) -> NaiveDateTime {
    if truncate {
        date.date().and_time(NaiveTime::MIN)
    } else {
        date
    }
}

/// Parse with `pattern`, apply `op`, format with the same pattern.
fn map_date_str<F>(input: &str, pattern: &str, op: F) -> Result<Option<String>>
where
    F: FnOnce(&NaiveDateTime) -> Result<NaiveDateTime>,
{
    let pattern = Pattern::compile(pattern)?;
    let Some(date) = parse_or_none(input, &pattern) else {
        return Ok(None);
    };
    let result = op(&date)?;
    Ok(Some(pattern.format(&result)))
}

fn out_of_range(date: &NaiveDateTime, what: &str) -> CalendarError {
    CalendarError::OutOfRange(format!("{date} {what}"))
}

// ── Tests ───────────────────────────────────────────────────────────────────
