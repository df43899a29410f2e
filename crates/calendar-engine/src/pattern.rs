//! Pattern-driven date formatting and parsing.
//!
//! A pattern is a string of pattern letters and literal text in the
//! familiar `yyyy-MM-dd HH:mm:ss` style. [`Pattern::compile`] turns it into
//! a token list once; the compiled value is immutable and can be shared
//! across threads and reused for any number of parse/format calls.
//!
//! Rendering, name matching and calendar validation are delegated to
//! `chrono::format`. This module owns what chrono has no notion of: the
//! letter syntax and quoting, digit runs for abutting fields, the
//! two-digit-year window, lenient rollover and the 1970 defaults.
//!
//! # Pattern Letters
//!
//! | Letter | Field | Output |
//! |---|---|---|
//! | `y` | year | `yy` → last two digits, `yyyy` → zero-padded to four |
//! | `M` | month | `M` → `2`, `MM` → `02`, `MMM` → `Feb`, `MMMM` → `February` |
//! | `d` | day of month | `d` → `5`, `dd` → `05` |
//! | `D` | day of year | `D` → `5`, `DDD` → `005` |
//! | `E` | weekday | `E`..`EEE` → `Mon`, `EEEE` → `Monday` |
//! | `u` | weekday number | 1 = Monday .. 7 = Sunday |
//! | `a` | AM/PM marker | `AM` / `PM` |
//! | `H` | hour (0-23) | zero-padded when repeated |
//! | `k` | hour (1-24) | zero-padded to the letter count |
//! | `K` | hour (0-11) | zero-padded to the letter count |
//! | `h` | hour (1-12) | zero-padded when repeated |
//! | `m` | minute | zero-padded when repeated |
//! | `s` | second | zero-padded when repeated |
//! | `S` | millisecond | always three digits |
//!
//! A repeated letter pads to the field's natural width (two digits, three
//! for day of year, four for year); extra repetitions add nothing.
//!
//! Text inside single quotes is literal (`''` is a quote). Any other ASCII
//! letter is rejected; every non-letter character is literal.
//!
//! # Parsing Rules
//!
//! The whole input must be consumed. A numeric field immediately followed by
//! another numeric field (`yyyyMMdd`) reads exactly as many digits as its
//! letter count; any other numeric field reads all consecutive digits, so
//! `yyyy/M/dd` accepts both `2000/1/15` and `2000/01/15`. Month and weekday
//! names match case-insensitively in short or long form. Fields that the
//! pattern does not mention default to 1970-01-01 00:00:00.000.

use std::fmt::{self, Write as _};
use std::iter;
use std::str::FromStr;

use chrono::format::{parse_and_remainder, Fixed, Item, Numeric, Pad, Parsed, StrftimeItems};
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Weekday};

use crate::error::{CalendarError, Result};

/// The pattern used by every operation that does not take one explicitly.
///
/// Functions taking a pattern have no default-pattern variants; pass this
/// constant to get `yyyy-MM-dd`.
pub const DEFAULT_PATTERN: &str = "yyyy-MM-dd";

/// Longest digit run accepted for a numeric field that is not abutting.
const MAX_FIELD_DIGITS: usize = 9;

// ── Parse options ───────────────────────────────────────────────────────────

/// How out-of-range field values are treated while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Leniency {
    /// Reject month 13, day 32, February 30, hour 24 under `H`, year 0, etc.
    #[default]
    Strict,
    /// Roll overflowing fields into the next larger unit
    /// (`2017-02-30` → March 2, month 13 → January of the next year).
    Lenient,
}

/// Options for [`Pattern::parse_with`].
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    pub leniency: Leniency,
    /// First year of the 100-year window that two-digit `yy` years resolve
    /// into. `None` uses 80 years before the current local year.
    pub century_start: Option<i32>,
}

impl ParseOptions {
    pub fn lenient() -> Self {
        Self {
            leniency: Leniency::Lenient,
            ..Default::default()
        }
    }
}

// ── Tokens ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Year,
    Month,
    DayOfMonth,
    DayOfYear,
    WeekdayName,
    WeekdayNumber,
    AmPm,
    Hour0To23,
    Hour1To24,
    Hour0To11,
    Hour1To12,
    Minute,
    Second,
    Millisecond,
}

impl FieldKind {
    fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'y' => Some(FieldKind::Year),
            'M' => Some(FieldKind::Month),
            'd' => Some(FieldKind::DayOfMonth),
            'D' => Some(FieldKind::DayOfYear),
            'E' => Some(FieldKind::WeekdayName),
            'u' => Some(FieldKind::WeekdayNumber),
            'a' => Some(FieldKind::AmPm),
            'H' => Some(FieldKind::Hour0To23),
            'k' => Some(FieldKind::Hour1To24),
            'K' => Some(FieldKind::Hour0To11),
            'h' => Some(FieldKind::Hour1To12),
            'm' => Some(FieldKind::Minute),
            's' => Some(FieldKind::Second),
            'S' => Some(FieldKind::Millisecond),
            _ => None,
        }
    }

    /// The chrono item that renders this field, or `None` for the two hour
    /// clocks chrono does not know (`k` and `K`).
    fn format_item(self, width: usize) -> Option<Item<'static>> {
        let pad = if width > 1 { Pad::Zero } else { Pad::None };
        let item = match self {
            FieldKind::Year if width == 2 => Item::Numeric(Numeric::YearMod100, Pad::Zero),
            FieldKind::Year => Item::Numeric(Numeric::Year, pad),
            FieldKind::Month if width >= 4 => Item::Fixed(Fixed::LongMonthName),
            FieldKind::Month if width == 3 => Item::Fixed(Fixed::ShortMonthName),
            FieldKind::Month => Item::Numeric(Numeric::Month, pad),
            FieldKind::DayOfMonth => Item::Numeric(Numeric::Day, pad),
            FieldKind::DayOfYear => Item::Numeric(Numeric::Ordinal, pad),
            FieldKind::WeekdayName if width >= 4 => Item::Fixed(Fixed::LongWeekdayName),
            FieldKind::WeekdayName => Item::Fixed(Fixed::ShortWeekdayName),
            FieldKind::WeekdayNumber => Item::Numeric(Numeric::WeekdayFromMon, Pad::None),
            FieldKind::AmPm => Item::Fixed(Fixed::UpperAmPm),
            FieldKind::Hour0To23 => Item::Numeric(Numeric::Hour, pad),
            FieldKind::Hour1To12 => Item::Numeric(Numeric::Hour12, pad),
            FieldKind::Minute => Item::Numeric(Numeric::Minute, pad),
            FieldKind::Second => Item::Numeric(Numeric::Second, pad),
            // `%3f`: milliseconds without the leading dot.
            FieldKind::Millisecond => return StrftimeItems::new("%3f").next(),
            FieldKind::Hour1To24 | FieldKind::Hour0To11 => return None,
        };
        Some(item)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Field { kind: FieldKind, width: usize },
    Literal(String),
}

impl Token {
    /// Whether the token reads and writes digits (as opposed to names or literals).
    fn is_numeric(&self) -> bool {
        match self {
            Token::Field { kind, width } => match kind {
                FieldKind::Month => *width <= 2,
                FieldKind::WeekdayName | FieldKind::AmPm => false,
                _ => true,
            },
            Token::Literal(_) => false,
        }
    }
}

// ── Pattern ─────────────────────────────────────────────────────────────────

/// A compiled date pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    tokens: Vec<Token>,
}

impl Pattern {
    /// Compile a pattern string.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidPattern`] for an unsupported pattern
    /// letter or an unterminated quote.
    ///
    /// # Examples
    ///
    /// ```
    /// use calendar_engine::Pattern;
    ///
    /// let pattern = Pattern::compile("dd/MM/yyyy").unwrap();
    /// let date = pattern.parse("15/02/2019").unwrap();
    /// assert_eq!(pattern.format(&date), "15/02/2019");
    /// ```
    pub fn compile(pattern: &str) -> Result<Self> {
        let mut tokens: Vec<Token> = Vec::new();
        let mut chars = pattern.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch == '\'' {
                if chars.peek() == Some(&'\'') {
                    chars.next();
                    push_literal(&mut tokens, '\'');
                    continue;
                }
                let mut closed = false;
                while let Some(quoted) = chars.next() {
                    if quoted == '\'' {
                        if chars.peek() == Some(&'\'') {
                            chars.next();
                            push_literal(&mut tokens, '\'');
                        } else {
                            closed = true;
                            break;
                        }
                    } else {
                        push_literal(&mut tokens, quoted);
                    }
                }
                if !closed {
                    return Err(CalendarError::InvalidPattern(format!(
                        "unterminated quote in '{pattern}'"
                    )));
                }
            } else if ch.is_ascii_alphabetic() {
                let kind = FieldKind::from_letter(ch).ok_or_else(|| {
                    CalendarError::InvalidPattern(format!(
                        "illegal pattern character '{ch}' in '{pattern}'"
                    ))
                })?;
                let mut width = 1;
                while chars.peek() == Some(&ch) {
                    chars.next();
                    width += 1;
                }
                tokens.push(Token::Field { kind, width });
            } else {
                push_literal(&mut tokens, ch);
            }
        }

        Ok(Self {
            source: pattern.to_string(),
            tokens,
        })
    }

    /// The compiled form of [`DEFAULT_PATTERN`], built without going through
    /// the compiler so it cannot fail.
    pub fn iso_date() -> Self {
        Self {
            source: DEFAULT_PATTERN.to_string(),
            tokens: vec![
                Token::Field {
                    kind: FieldKind::Year,
                    width: 4,
                },
                Token::Literal("-".to_string()),
                Token::Field {
                    kind: FieldKind::Month,
                    width: 2,
                },
                Token::Literal("-".to_string()),
                Token::Field {
                    kind: FieldKind::DayOfMonth,
                    width: 2,
                },
            ],
        }
    }

    /// The pattern string this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Render a date with this pattern.
    pub fn format(&self, date: &NaiveDateTime) -> String {
        let mut out = String::with_capacity(self.source.len() + 8);
        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Field { kind, width } => {
                    // Only offset and timestamp items can fail to render.
                    let _ = write_field(&mut out, date, *kind, *width);
                }
            }
        }
        out
    }

    /// Parse with strict field validation.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Parse`] if the input does not follow the
    /// pattern or a field is out of range.
    pub fn parse(&self, input: &str) -> Result<NaiveDateTime> {
        self.parse_with(input, &ParseOptions::default())
    }

    /// Parse with explicit [`ParseOptions`].
    pub fn parse_with(&self, input: &str, options: &ParseOptions) -> Result<NaiveDateTime> {
        let mut cursor = Cursor { input, pos: 0 };
        let mut fields = ParsedFields::default();

        for (idx, token) in self.tokens.iter().enumerate() {
            match token {
                Token::Literal(text) => {
                    if !cursor.take_literal(text) {
                        return Err(self.mismatch(input, cursor.pos, &format!("'{text}'")));
                    }
                }
                Token::Field { kind, width } => {
                    let abutting = self.tokens.get(idx + 1).is_some_and(Token::is_numeric);
                    self.read_field(&mut cursor, &mut fields, *kind, *width, abutting, options)?;
                }
            }
        }

        if cursor.pos < input.len() {
            return Err(CalendarError::Parse(format!(
                "'{input}' has unparsed text '{}' after pattern '{}'",
                &input[cursor.pos..],
                self.source
            )));
        }

        let resolved = match options.leniency {
            Leniency::Strict => fields.resolve_strict(),
            Leniency::Lenient => fields.resolve_lenient(),
        };
        resolved.map_err(|reason| {
            CalendarError::Parse(format!(
                "'{input}' under pattern '{}': {reason}",
                self.source
            ))
        })
    }

    fn read_field(
        &self,
        cursor: &mut Cursor<'_>,
        fields: &mut ParsedFields,
        kind: FieldKind,
        width: usize,
        abutting: bool,
        options: &ParseOptions,
    ) -> Result<()> {
        let input = cursor.input;
        match kind {
            FieldKind::Month if width >= 3 => {
                let parsed = cursor
                    .take_fixed(Fixed::LongMonthName)
                    .ok_or_else(|| self.mismatch(input, cursor.pos, "a month name"))?;
                fields.month = parsed.month().map(i64::from);
            }
            FieldKind::WeekdayName => {
                let parsed = cursor
                    .take_fixed(Fixed::LongWeekdayName)
                    .ok_or_else(|| self.mismatch(input, cursor.pos, "a weekday name"))?;
                fields.weekday = parsed.weekday().map(|w| i64::from(w.number_from_monday()));
            }
            FieldKind::AmPm => {
                let parsed = cursor
                    .take_fixed(Fixed::UpperAmPm)
                    .ok_or_else(|| self.mismatch(input, cursor.pos, "AM or PM"))?;
                fields.pm = parsed.hour_div_12().map(|half| half == 1);
            }
            _ => {
                let start = cursor.pos;
                let limit = if abutting { width } else { MAX_FIELD_DIGITS };
                let digits = cursor
                    .take_digits(limit)
                    .ok_or_else(|| self.mismatch(input, start, "digits"))?;
                let value: i64 = digits.parse().map_err(|_| {
                    CalendarError::Parse(format!("'{input}': invalid number '{digits}'"))
                })?;
                match kind {
                    FieldKind::Year => {
                        fields.year = Some(if width <= 2 && digits.len() == 2 {
                            let start_year = options
                                .century_start
                                .unwrap_or_else(|| Local::now().year() - 80);
                            resolve_two_digit_year(value, start_year)
                        } else {
                            value
                        });
                    }
                    FieldKind::Month => fields.month = Some(value),
                    FieldKind::DayOfMonth => fields.day = Some(value),
                    FieldKind::DayOfYear => fields.day_of_year = Some(value),
                    FieldKind::WeekdayNumber => fields.weekday = Some(value),
                    FieldKind::Minute => fields.minute = Some(value),
                    FieldKind::Second => fields.second = Some(value),
                    FieldKind::Millisecond => fields.millisecond = Some(value),
                    hour_kind => fields.hour = Some((hour_kind, value)),
                }
            }
        }
        Ok(())
    }

    fn mismatch(&self, input: &str, pos: usize, expected: &str) -> CalendarError {
        CalendarError::Parse(format!(
            "'{input}' does not match pattern '{}': expected {expected} at position {pos}",
            self.source
        ))
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::iso_date()
    }
}

impl FromStr for Pattern {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        Self::compile(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn push_literal(tokens: &mut Vec<Token>, ch: char) {
    if let Some(Token::Literal(text)) = tokens.last_mut() {
        text.push(ch);
    } else {
        tokens.push(Token::Literal(ch.to_string()));
    }
}

// ── Formatting ──────────────────────────────────────────────────────────────

fn write_field(
    out: &mut String,
    date: &NaiveDateTime,
    kind: FieldKind,
    width: usize,
) -> fmt::Result {
    match kind.format_item(width) {
        Some(item) => write!(out, "{}", date.format_with_items(iter::once(item))),
        None => {
            let hour = date.hour();
            let value = match kind {
                FieldKind::Hour1To24 if hour == 0 => 24,
                FieldKind::Hour0To11 => hour % 12,
                _ => hour,
            };
            write!(out, "{value:0width$}")
        }
    }
}

/// Map a two-digit year into the 100-year window starting at `start_year`.
fn resolve_two_digit_year(yy: i64, start_year: i32) -> i64 {
    let start = i64::from(start_year);
    let century = start.div_euclid(100) * 100;
    let candidate = century + yy;
    if candidate < start {
        candidate + 100
    } else {
        candidate
    }
}

// ── Parsing ─────────────────────────────────────────────────────────────────

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn take_literal(&mut self, literal: &str) -> bool {
        if self.rest().starts_with(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    fn take_digits(&mut self, limit: usize) -> Option<&'a str> {
        let rest = self.rest();
        let len = rest
            .bytes()
            .take_while(u8::is_ascii_digit)
            .take(limit)
            .count();
        if len == 0 {
            return None;
        }
        self.pos += len;
        Some(&rest[..len])
    }

    /// Match a single chrono name item (month, weekday, AM/PM) at the cursor.
    fn take_fixed(&mut self, name: Fixed) -> Option<Parsed> {
        let rest = self.rest();
        let mut parsed = Parsed::new();
        let remainder =
            parse_and_remainder(&mut parsed, rest, iter::once(Item::Fixed(name))).ok()?;
        self.pos += rest.len() - remainder.len();
        Some(parsed)
    }
}

/// Raw field values collected from the input, before validation.
#[derive(Debug, Default)]
struct ParsedFields {
    year: Option<i64>,
    month: Option<i64>,
    day: Option<i64>,
    day_of_year: Option<i64>,
    /// 1 = Monday .. 7 = Sunday
    weekday: Option<i64>,
    pm: Option<bool>,
    hour: Option<(FieldKind, i64)>,
    minute: Option<i64>,
    second: Option<i64>,
    millisecond: Option<i64>,
}

impl ParsedFields {
    /// Fill a chrono [`Parsed`] with the collected values plus defaults and
    /// let it check that they name a real date and time.
    fn resolve_strict(&self) -> std::result::Result<NaiveDateTime, String> {
        let out_of_range = |field: &str, value: i64| format!("{field} {value} out of range");
        let mut parsed = Parsed::new();

        let year = self.year.unwrap_or(1970);
        if year < 1 {
            return Err(out_of_range("year", year));
        }
        parsed
            .set_year(year)
            .map_err(|_| out_of_range("year", year))?;

        let ordinal_only = self.day_of_year.is_some() && self.month.is_none() && self.day.is_none();
        if !ordinal_only {
            let month = self.month.unwrap_or(1);
            parsed
                .set_month(month)
                .map_err(|_| out_of_range("month", month))?;
            let day = self.day.unwrap_or(1);
            parsed.set_day(day).map_err(|_| out_of_range("day", day))?;
        }
        if let Some(doy) = self.day_of_year {
            parsed
                .set_ordinal(doy)
                .map_err(|_| out_of_range("day of year", doy))?;
        }
        if let Some(number) = self.weekday {
            let weekday = weekday_from_number(number).ok_or_else(|| out_of_range("weekday", number))?;
            parsed.set_weekday(weekday).map_err(|err| err.to_string())?;
        }

        set_strict_hour(&mut parsed, self.hour, self.pm)?;
        let minute = self.minute.unwrap_or(0);
        parsed
            .set_minute(minute)
            .map_err(|_| out_of_range("minute", minute))?;
        // chrono takes 60 as a leap second.
        let second = self.second.unwrap_or(0);
        if second == 60 || parsed.set_second(second).is_err() {
            return Err(out_of_range("second", second));
        }
        let millisecond = self.millisecond.unwrap_or(0);
        if !(0..=999).contains(&millisecond) {
            return Err(out_of_range("millisecond", millisecond));
        }
        parsed
            .set_nanosecond(millisecond * 1_000_000)
            .map_err(|_| out_of_range("millisecond", millisecond))?;

        let date = parsed
            .to_naive_date()
            .map_err(|err| format!("not a calendar date: {err}"))?;
        let time = parsed
            .to_naive_time()
            .map_err(|err| format!("not a time of day: {err}"))?;
        Ok(date.and_time(time))
    }

    fn resolve_lenient(&self) -> std::result::Result<NaiveDateTime, String> {
        let out_of_range = || "date out of range".to_string();
        let year = self.year.unwrap_or(1970);

        let (first, day_offset) =
            if self.day_of_year.is_some() && self.month.is_none() && self.day.is_none() {
                (first_of_month(year, 1)?, self.day_of_year.unwrap_or(1) - 1)
            } else {
                (
                    first_of_month(year, self.month.unwrap_or(1))?,
                    self.day.unwrap_or(1) - 1,
                )
            };
        let start_of_day = TimeDelta::try_days(day_offset)
            .and_then(|days| first.checked_add_signed(days))
            .ok_or_else(out_of_range)?;

        let pm_offset = if self.pm == Some(true) { 12 } else { 0 };
        let hour = match self.hour {
            Some((FieldKind::Hour1To24, 24)) => Some(0),
            Some((FieldKind::Hour1To12, 12)) => Some(pm_offset),
            Some((FieldKind::Hour1To12 | FieldKind::Hour0To11, value)) => {
                value.checked_add(pm_offset)
            }
            Some((_, value)) => Some(value),
            None => Some(pm_offset),
        }
        .ok_or_else(|| "hour out of range".to_string())?;

        let offset = TimeDelta::try_hours(hour)
            .zip(TimeDelta::try_minutes(self.minute.unwrap_or(0)))
            .zip(TimeDelta::try_seconds(self.second.unwrap_or(0)))
            .zip(TimeDelta::try_milliseconds(self.millisecond.unwrap_or(0)))
            .and_then(|(((h, m), s), ms)| h.checked_add(&m)?.checked_add(&s)?.checked_add(&ms))
            .ok_or_else(|| "time of day out of range".to_string())?;

        start_of_day
            .and_time(NaiveTime::MIN)
            .checked_add_signed(offset)
            .ok_or_else(out_of_range)
    }
}

/// First day of `month` in `year`, where `month` may lie outside 1..=12 and
/// rolls into neighbouring years.
fn first_of_month(year: i64, month: i64) -> std::result::Result<NaiveDate, String> {
    let month0 = month - 1;
    year.checked_add(month0.div_euclid(12))
        .and_then(|year| i32::try_from(year).ok())
        .and_then(|year| NaiveDate::from_ymd_opt(year, month0.rem_euclid(12) as u32 + 1, 1))
        .ok_or_else(|| format!("year {year} out of range"))
}

fn weekday_from_number(number: i64) -> Option<Weekday> {
    let index = u8::try_from(number.checked_sub(1)?).ok()?;
    Weekday::try_from(index).ok()
}

/// Range-check an hour for its clock and store it. A 12-hour value without
/// an AM/PM marker counts as AM.
fn set_strict_hour(
    parsed: &mut Parsed,
    hour: Option<(FieldKind, i64)>,
    pm: Option<bool>,
) -> std::result::Result<(), String> {
    let Some((kind, value)) = hour else {
        let hour = if pm == Some(true) { 12 } else { 0 };
        return parsed.set_hour(hour).map_err(|err| err.to_string());
    };
    let range = match kind {
        FieldKind::Hour1To24 => 1..=24,
        FieldKind::Hour0To11 => 0..=11,
        FieldKind::Hour1To12 => 1..=12,
        _ => 0..=23,
    };
    if !range.contains(&value) {
        return Err(format!("hour {value} out of range"));
    }
    let stored = match kind {
        FieldKind::Hour1To24 => parsed.set_hour(value % 24),
        FieldKind::Hour0To11 | FieldKind::Hour1To12 => {
            let twelve_hour = if value == 0 { 12 } else { value };
            parsed
                .set_hour12(twelve_hour)
                .and_then(|()| parsed.set_ampm(pm == Some(true)))
        }
        _ => parsed.set_hour(value),
    };
    stored.map_err(|err| err.to_string())
}

/// Number of days in the month containing `date`.
pub(crate) fn days_in_month(date: NaiveDate) -> u32 {
    let (y, m) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|first_next| first_next.pred_opt())
        .map_or(31, |last| last.day())
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn compile(p: &str) -> Pattern {
        Pattern::compile(p).unwrap()
    }

    // ── compile ─────────────────────────────────────────────────────────

    #[test]
    fn test_compile_iso_date_matches_builtin() {
        assert_eq!(compile(DEFAULT_PATTERN), Pattern::iso_date());
    }

    #[test]
    fn test_compile_illegal_letter() {
        let err = Pattern::compile("yyyy-MM-dd q").unwrap_err();
        assert!(matches!(err, CalendarError::InvalidPattern(_)));
        assert!(err.to_string().contains("illegal pattern character 'q'"), "got: {err}");
    }

    #[test]
    fn test_compile_unterminated_quote() {
        let err = Pattern::compile("yyyy 'at").unwrap_err();
        assert!(err.to_string().contains("unterminated quote"), "got: {err}");
    }

    #[test]
    fn test_compile_quoted_literals() {
        let pattern = compile("yyyy-MM-dd'T'HH:mm 'o''clock' ''");
        let date = dt(2026, 3, 5, 9, 7, 0);
        assert_eq!(pattern.format(&date), "2026-03-05T09:07 o'clock '");
    }

    #[test]
    fn test_display_is_source() {
        assert_eq!(compile("dd/MM/yyyy").to_string(), "dd/MM/yyyy");
        assert_eq!("HH:mm".parse::<Pattern>().unwrap().as_str(), "HH:mm");
    }

    // ── format ──────────────────────────────────────────────────────────

    #[test]
    fn test_format_default_pattern() {
        assert_eq!(Pattern::default().format(&dt(2019, 2, 15, 10, 0, 0)), "2019-02-15");
    }

    #[test]
    fn test_format_two_digit_year_and_padding() {
        let pattern = compile("yy/M/d H:m:s");
        assert_eq!(pattern.format(&dt(2005, 1, 9, 4, 5, 6)), "05/1/9 4:5:6");
    }

    #[test]
    fn test_format_month_and_weekday_names() {
        let pattern = compile("EEE, d MMM yyyy / EEEE MMMM");
        // 2024-01-01 is a Monday
        assert_eq!(
            pattern.format(&dt(2024, 1, 1, 0, 0, 0)),
            "Mon, 1 Jan 2024 / Monday January"
        );
    }

    #[test]
    fn test_format_twelve_hour_clock() {
        let pattern = compile("hh:mm a|KK|kk");
        assert_eq!(pattern.format(&dt(2024, 1, 1, 0, 30, 0)), "12:30 AM|00|24");
        assert_eq!(pattern.format(&dt(2024, 1, 1, 12, 0, 0)), "12:00 PM|00|12");
        assert_eq!(pattern.format(&dt(2024, 1, 1, 23, 15, 0)), "11:15 PM|11|23");
    }

    #[test]
    fn test_format_millis_and_day_of_year() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31)
            .unwrap()
            .and_hms_milli_opt(8, 0, 1, 42)
            .unwrap();
        assert_eq!(compile("DDD ss.SSS u").format(&date), "366 01.042 2");
    }

    // ── parse ───────────────────────────────────────────────────────────

    #[test]
    fn test_parse_iso_date() {
        let date = Pattern::iso_date().parse("2017-09-13").unwrap();
        assert_eq!(date, dt(2017, 9, 13, 0, 0, 0));
    }

    #[test]
    fn test_parse_full_datetime() {
        let date = compile("yyyy-MM-dd HH:mm:ss").parse("2024-02-29 23:59:58").unwrap();
        assert_eq!(date, dt(2024, 2, 29, 23, 59, 58));
    }

    #[test]
    fn test_parse_non_padded_month() {
        let date = compile("yyyy/M/dd").parse("2000/1/15").unwrap();
        assert_eq!(date, dt(2000, 1, 15, 0, 0, 0));
    }

    #[test]
    fn test_parse_abutting_numeric_fields() {
        let date = compile("yyyyMMddHHmm").parse("201702281530").unwrap();
        assert_eq!(date, dt(2017, 2, 28, 15, 30, 0));
    }

    #[test]
    fn test_parse_month_names_case_insensitive() {
        let pattern = compile("dd MMM yyyy");
        assert_eq!(pattern.parse("05 mar 2021").unwrap(), dt(2021, 3, 5, 0, 0, 0));
        assert_eq!(pattern.parse("05 MARCH 2021").unwrap(), dt(2021, 3, 5, 0, 0, 0));
    }

    #[test]
    fn test_parse_twelve_hour_clock() {
        let pattern = compile("yyyy-MM-dd hh:mm a");
        assert_eq!(
            pattern.parse("2024-06-01 12:05 AM").unwrap(),
            dt(2024, 6, 1, 0, 5, 0)
        );
        assert_eq!(
            pattern.parse("2024-06-01 02:30 pm").unwrap(),
            dt(2024, 6, 1, 14, 30, 0)
        );
    }

    #[test]
    fn test_parse_rejects_trailing_text() {
        let err = Pattern::iso_date().parse("2017-02-15abc").unwrap_err();
        assert!(err.to_string().contains("unparsed text 'abc'"), "got: {err}");
    }

    #[test]
    fn test_parse_rejects_structural_mismatch() {
        let err = Pattern::iso_date().parse("15/02/2017").unwrap_err();
        assert!(matches!(err, CalendarError::Parse(_)));
        assert!(Pattern::iso_date().parse("").is_err());
    }

    #[test]
    fn test_parse_strict_rejects_out_of_range() {
        let pattern = Pattern::iso_date();
        assert!(pattern.parse("2017-13-01").is_err());
        assert!(pattern.parse("2017-01-32").is_err());
        assert!(pattern.parse("2017-02-29").is_err());
        assert!(pattern.parse("2017-00-10").is_err());
        assert!(compile("HH:mm").parse("24:00").is_err());
        assert!(compile("hh a").parse("13 PM").is_err());
    }

    #[test]
    fn test_parse_strict_checks_weekday() {
        let pattern = compile("EEE yyyy-MM-dd");
        assert!(pattern.parse("Mon 2024-01-01").is_ok());
        assert!(pattern.parse("Tue 2024-01-01").is_err());
    }

    #[test]
    fn test_parse_lenient_rolls_over() {
        let pattern = Pattern::iso_date();
        let options = ParseOptions::lenient();
        assert_eq!(
            pattern.parse_with("2017-02-30", &options).unwrap(),
            dt(2017, 3, 2, 0, 0, 0)
        );
        assert_eq!(
            pattern.parse_with("2017-13-01", &options).unwrap(),
            dt(2018, 1, 1, 0, 0, 0)
        );
        assert_eq!(
            pattern.parse_with("2017-03-00", &options).unwrap(),
            dt(2017, 2, 28, 0, 0, 0)
        );
        let time = compile("yyyy-MM-dd HH:mm");
        assert_eq!(
            time.parse_with("2017-12-31 24:30", &options).unwrap(),
            dt(2018, 1, 1, 0, 30, 0)
        );
    }

    #[test]
    fn test_parse_lenient_huge_fields_are_errors() {
        let options = ParseOptions::lenient();
        let days = format!("{}MM", "d".repeat(18));
        let err = compile(&days)
            .parse_with("99999999999999999901", &options)
            .unwrap_err();
        assert!(matches!(err, CalendarError::Parse(_)));
        assert!(err.to_string().contains("out of range"), "got: {err}");

        let ordinal = format!("{}yyyy", "D".repeat(18));
        let err = compile(&ordinal)
            .parse_with("9999999999999999991970", &options)
            .unwrap_err();
        assert!(err.to_string().contains("out of range"), "got: {err}");

        let hours = format!("a{}ss", "K".repeat(19));
        let err = compile(&hours)
            .parse_with(&format!("PM{}00", i64::MAX), &options)
            .unwrap_err();
        assert!(err.to_string().contains("hour out of range"), "got: {err}");
    }

    #[test]
    fn test_parse_strict_rejects_year_zero() {
        let err = Pattern::iso_date().parse("0000-01-01").unwrap_err();
        assert!(err.to_string().contains("year 0 out of range"), "got: {err}");
        assert_eq!(
            Pattern::iso_date().parse("0001-01-01").unwrap(),
            dt(1, 1, 1, 0, 0, 0)
        );
    }

    #[test]
    fn test_parse_strict_checks_day_of_year_against_date() {
        let pattern = compile("yyyy-MM-dd DDD");
        assert!(pattern.parse("2024-03-01 061").is_ok());
        assert!(pattern.parse("2024-03-01 060").is_err());
    }

    #[test]
    fn test_parse_strict_rejects_leap_second() {
        assert!(compile("HH:mm:ss").parse("23:59:60").is_err());
        assert!(compile("ss.SSS").parse("01.1000").is_err());
    }

    #[test]
    fn test_parse_one_to_twenty_four_clock() {
        let pattern = compile("yyyy-MM-dd kk:mm");
        assert_eq!(
            pattern.parse("2024-06-01 24:10").unwrap(),
            dt(2024, 6, 1, 0, 10, 0)
        );
        assert!(pattern.parse("2024-06-01 00:10").is_err());
        let pattern = compile("KK a");
        assert_eq!(pattern.parse("00 PM").unwrap(), dt(1970, 1, 1, 12, 0, 0));
        assert!(pattern.parse("12 AM").is_err());
    }

    #[test]
    fn test_parse_day_of_year_only() {
        let date = compile("yyyy-DDD").parse("2024-060").unwrap();
        assert_eq!(date, dt(2024, 2, 29, 0, 0, 0));
        assert!(compile("yyyy-DDD").parse("2023-366").is_err());
    }

    #[test]
    fn test_parse_two_digit_year_window() {
        let options = ParseOptions {
            century_start: Some(1946),
            ..Default::default()
        };
        let pattern = compile("dd/MM/yy");
        assert_eq!(
            pattern.parse_with("01/01/45", &options).unwrap(),
            dt(2045, 1, 1, 0, 0, 0)
        );
        assert_eq!(
            pattern.parse_with("01/01/46", &options).unwrap(),
            dt(1946, 1, 1, 0, 0, 0)
        );
        // More than two digits is taken literally.
        assert_eq!(
            pattern.parse_with("01/01/2017", &options).unwrap(),
            dt(2017, 1, 1, 0, 0, 0)
        );
    }

    #[test]
    fn test_parse_missing_fields_default_to_epoch() {
        assert_eq!(compile("HH:mm").parse("10:15").unwrap(), dt(1970, 1, 1, 10, 15, 0));
    }

    #[test]
    fn test_days_in_month() {
        let feb_leap = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        let feb = NaiveDate::from_ymd_opt(2023, 2, 10).unwrap();
        let dec = NaiveDate::from_ymd_opt(2023, 12, 1).unwrap();
        assert_eq!(days_in_month(feb_leap), 29);
        assert_eq!(days_in_month(feb), 28);
        assert_eq!(days_in_month(dec), 31);
    }
}
