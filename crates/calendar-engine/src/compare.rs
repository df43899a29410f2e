//! Ordering and range checks over dates.
//!
//! The string forms parse first and propagate parse failures as
//! [`crate::CalendarError::Parse`]; an ordering or a flag has no spare value
//! to act as a "no result" sentinel.

use std::cmp::Ordering;

use chrono::NaiveDateTime;

use crate::error::Result;
use crate::pattern::Pattern;

/// Three-way comparison by instant. `Less`, `Equal` and `Greater` stand for
/// -1, 0 and 1.
pub fn compare(date1: &NaiveDateTime, date2: &NaiveDateTime) -> Ordering {
    date1.cmp(date2)
}

/// Compare two date strings that share a pattern.
///
/// ```
/// use calendar_engine::compare::compare_str;
/// use std::cmp::Ordering;
///
/// let ord = compare_str("2017-01-01", "2017-03-01", "yyyy-MM-dd").unwrap();
/// assert_eq!(ord, Ordering::Less);
/// ```
pub fn compare_str(input1: &str, input2: &str, pattern: &str) -> Result<Ordering> {
    compare_with_patterns(input1, pattern, input2, pattern)
}

/// Compare two date strings, each parsed with its own pattern.
pub fn compare_with_patterns(
    input1: &str,
    pattern1: &str,
    input2: &str,
    pattern2: &str,
) -> Result<Ordering> {
    let date1 = Pattern::compile(pattern1)?.parse(input1)?;
    let date2 = Pattern::compile(pattern2)?.parse(input2)?;
    Ok(compare(&date1, &date2))
}

/// Whether `start <= date <= end`, inclusive at both ends.
///
/// The range is not checked for `start <= end`; an inverted range simply
/// contains nothing.
pub fn is_between(date: &NaiveDateTime, start: &NaiveDateTime, end: &NaiveDateTime) -> bool {
    compare(date, start) != Ordering::Less && compare(date, end) != Ordering::Greater
}

/// String form of [`is_between`]; all three inputs share `pattern`.
pub fn is_between_str(input: &str, start: &str, end: &str, pattern: &str) -> Result<bool> {
    let pattern = Pattern::compile(pattern)?;
    let date = pattern.parse(input)?;
    let start = pattern.parse(start)?;
    let end = pattern.parse(end)?;
    Ok(is_between(&date, &start, &end))
}
