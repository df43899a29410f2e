//! Error types for calendar-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Unparseable date: {0}")]
    Parse(String),

    #[error("Date out of range: {0}")]
    OutOfRange(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, CalendarError>;
