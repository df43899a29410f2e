//! # calendar-engine
//!
//! Calendar arithmetic without re-deriving month-end, year-boundary and
//! leap-year edge cases at every call site.
//!
//! Dates are plain [`chrono::NaiveDateTime`] values. Every function is pure
//! and returns a new value; nothing is mutated or cached between calls.
//!
//! ## Modules
//!
//! - [`ops`] — Field shifts, first/last day of month or year, month counts, day of week
//! - [`codec`] — Parse and format with a pattern string (default `yyyy-MM-dd`)
//! - [`compare`] — Three-way comparison and inclusive range checks
//! - [`pattern`] — The compiled pattern engine behind [`codec`]
//! - [`field`] — The [`CalendarField`] shift selector
//! - [`error`] — Error types
//!
//! ## Failure Model
//!
//! String-producing operations that parse their input return
//! `Ok(None)` when the input does not match the pattern. Operations that
//! return a date, number or flag report the same situation as
//! [`CalendarError::Parse`]. A malformed pattern is always an error.
//!
//! ## Default Pattern
//!
//! Every function that reads or writes strings takes its pattern
//! explicitly. Pass [`DEFAULT_PATTERN`] (`yyyy-MM-dd`) where a caller has
//! no pattern of its own.

pub mod codec;
pub mod compare;
pub mod error;
pub mod field;
pub mod ops;
pub mod pattern;

pub use codec::{
    format, is_valid, parse, parse_with, reformat, system_date_string,
    system_date_string_in,
};
pub use compare::{compare, compare_str, compare_with_patterns, is_between, is_between_str};
pub use error::CalendarError;
pub use field::CalendarField;
pub use ops::{
    add, add_str, day_of_week, day_of_week_today, first_day_by_year, first_day_of_month,
    first_day_of_month_str, first_day_of_next_month, first_day_of_next_month_str,
    first_day_of_next_year, first_day_of_next_year_str, first_day_of_year, first_day_of_year_str,
    last_day_by_year, last_day_of_month, last_day_of_month_str, last_day_of_next_month,
    last_day_of_next_month_str, last_day_of_next_year, last_day_of_next_year_str,
    last_day_of_year, last_day_of_year_str, month_diff, month_diff_str,
};
pub use pattern::{Leniency, ParseOptions, Pattern, DEFAULT_PATTERN};
