//! String ↔ date conversion.
//!
//! Thin convenience layer over [`Pattern`]: each call compiles its pattern,
//! so nothing is cached or shared between calls. Callers that format or
//! parse in a loop can compile a [`Pattern`] once and reuse it.
//!
//! Failure handling follows the return type. Operations that produce a
//! string from a parsed input report a parse failure as `Ok(None)`;
//! operations returning a date, a number or a flag report it as
//! [`CalendarError::Parse`]. A malformed pattern is always an error.

use chrono::{Local, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::error::{CalendarError, Result};
use crate::pattern::{ParseOptions, Pattern};

/// Parse `input` with `pattern`, strictly.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidPattern`] if the pattern cannot be
/// compiled, or [`CalendarError::Parse`] if the input does not match it or
/// holds an out-of-range field (month 13, day 32, February 30).
///
/// # Examples
///
/// ```
/// use calendar_engine::codec::parse;
/// use chrono::Datelike;
///
/// let date = parse("2017-09-13", "yyyy-MM-dd").unwrap();
/// assert_eq!(date.month(), 9);
/// assert!(parse("2017-02-30", "yyyy-MM-dd").is_err());
/// ```
pub fn parse(input: &str, pattern: &str) -> Result<NaiveDateTime> {
    Pattern::compile(pattern)?.parse(input)
}

/// Parse `input` with `pattern` and explicit [`ParseOptions`].
pub fn parse_with(input: &str, pattern: &str, options: &ParseOptions) -> Result<NaiveDateTime> {
    Pattern::compile(pattern)?.parse_with(input, options)
}

/// Format `date` with `pattern`.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidPattern`] if the pattern cannot be compiled.
pub fn format(date: &NaiveDateTime, pattern: &str) -> Result<String> {
    Ok(Pattern::compile(pattern)?.format(date))
}

/// Re-render a date string from one pattern into another.
///
/// Returns `Ok(None)` when `input` does not parse under `input_pattern`.
///
/// ```
/// use calendar_engine::codec::reformat;
///
/// let out = reformat("2019-02-15", "yyyy-MM-dd", "dd/MM/yyyy").unwrap();
/// assert_eq!(out.as_deref(), Some("15/02/2019"));
///
/// let out = reformat("2000/1/15", "yyyy/M/dd", "yyyy/MM/dd").unwrap();
/// assert_eq!(out.as_deref(), Some("2000/01/15"));
/// ```
pub fn reformat(input: &str, input_pattern: &str, output_pattern: &str) -> Result<Option<String>> {
    let input_pattern = Pattern::compile(input_pattern)?;
    let output_pattern = Pattern::compile(output_pattern)?;
    Ok(parse_or_none(input, &input_pattern).map(|date| output_pattern.format(&date)))
}

/// Whether `input` is a real calendar date under `pattern` with strict
/// field validation.
///
/// # Errors
///
/// Only a malformed pattern is an error; an unparseable input is `Ok(false)`.
pub fn is_valid(input: &str, pattern: &str) -> Result<bool> {
    let pattern = Pattern::compile(pattern)?;
    Ok(pattern.parse(input).is_ok())
}

/// The current local date formatted with `pattern`.
pub fn system_date_string(pattern: &str) -> Result<String> {
    format(&Local::now().naive_local(), pattern)
}

/// The current date in an IANA timezone formatted with `pattern`.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidTimezone`] for an unknown zone name, or
/// [`CalendarError::InvalidPattern`] for a malformed pattern.
pub fn system_date_string_in(pattern: &str, timezone: &str) -> Result<String> {
    let tz = parse_timezone(timezone)?;
    format(&Utc::now().with_timezone(&tz).naive_local(), pattern)
}

/// Parse, logging and discarding the failure.
pub(crate) fn parse_or_none(input: &str, pattern: &Pattern) -> Option<NaiveDateTime> {
    match pattern.parse(input) {
        Ok(date) => Some(date),
        Err(err) => {
            tracing::debug!(input, pattern = pattern.as_str(), error = %err, "parse failed, no result");
            None
        }
    }
}

fn parse_timezone(s: &str) -> Result<Tz> {
    s.parse::<Tz>()
        .map_err(|_| CalendarError::InvalidTimezone(format!("'{s}'")))
}
