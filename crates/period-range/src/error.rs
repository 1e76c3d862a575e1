//! Error types for period-range operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Invalid period unit: '{0}' (expected minute, hour, day, week, month or year)")]
    InvalidUnit(String),

    #[error("Unknown period shortcut: '{0}'")]
    UnknownShortcut(String),

    #[error("Invalid week start: '{0}' (expected monday or sunday)")]
    InvalidWeekStart(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),
}

pub type Result<T> = std::result::Result<T, PeriodError>;
