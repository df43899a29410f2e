//! Calendar field selector for [`crate::ops::add`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

/// The unit a date is shifted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarField {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl CalendarField {
    pub const ALL: [CalendarField; 8] = [
        CalendarField::Year,
        CalendarField::Month,
        CalendarField::Week,
        CalendarField::Day,
        CalendarField::Hour,
        CalendarField::Minute,
        CalendarField::Second,
        CalendarField::Millisecond,
    ];

    /// Lowercase name, the same spelling serde uses.
    pub fn as_str(&self) -> &'static str {
        match self {
            CalendarField::Year => "year",
            CalendarField::Month => "month",
            CalendarField::Week => "week",
            CalendarField::Day => "day",
            CalendarField::Hour => "hour",
            CalendarField::Minute => "minute",
            CalendarField::Second => "second",
            CalendarField::Millisecond => "millisecond",
        }
    }
}

impl fmt::Display for CalendarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalendarField {
    type Err = CalendarError;

    /// Accepts the lowercase name plus the plural and a few short forms
    /// ("years", "d", "ms").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "year" | "years" | "y" => Ok(CalendarField::Year),
            "month" | "months" => Ok(CalendarField::Month),
            "week" | "weeks" | "w" => Ok(CalendarField::Week),
            "day" | "days" | "d" => Ok(CalendarField::Day),
            "hour" | "hours" | "h" => Ok(CalendarField::Hour),
            "minute" | "minutes" | "min" => Ok(CalendarField::Minute),
            "second" | "seconds" | "sec" | "s" => Ok(CalendarField::Second),
            "millisecond" | "milliseconds" | "ms" => Ok(CalendarField::Millisecond),
            _ => Err(CalendarError::InvalidArgument(format!(
                "unknown calendar field '{}'",
                s.trim()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_plural_and_case() {
        assert_eq!("Months".parse::<CalendarField>().unwrap(), CalendarField::Month);
        assert_eq!(" day ".parse::<CalendarField>().unwrap(), CalendarField::Day);
        assert_eq!("ms".parse::<CalendarField>().unwrap(), CalendarField::Millisecond);
    }

    #[test]
    fn test_from_str_unknown_field() {
        let err = "fortnight".parse::<CalendarField>().unwrap_err();
        assert!(matches!(err, CalendarError::InvalidArgument(_)));
        assert!(err.to_string().contains("fortnight"), "got: {err}");
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for field in CalendarField::ALL {
            assert_eq!(field.to_string().parse::<CalendarField>().unwrap(), field);
        }
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&CalendarField::Millisecond).unwrap();
        assert_eq!(json, "\"millisecond\"");
        let back: CalendarField = serde_json::from_str("\"week\"").unwrap();
        assert_eq!(back, CalendarField::Week);
    }
}
