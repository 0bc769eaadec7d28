use chrono::NaiveDate;
use thiserror::Error;

/// Calendar generation and validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RfcError {
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Invalid recurrence: {0}")]
    InvalidRecurrence(String),

    #[error("Invalid day of week: {0:?}")]
    InvalidDayOfWeek(String),

    #[error("Invalid frequency: {0:?}")]
    InvalidFrequency(String),

    #[error("Invalid time of day: {0}")]
    InvalidTimeOfDay(String),

    #[error("End time '{end}' is before start time '{start}'")]
    EndBeforeStart { end: String, start: String },

    #[error("No recurrence found for exception date {0}")]
    NoRecurrenceFoundForException(NaiveDate),

    #[error("Invalid email: {0:?}")]
    InvalidEmail(String),

    #[error("Invalid reminder: {0}")]
    InvalidReminder(String),

    #[error("Failed to find {weekday} within one week")]
    AnchorNotFound { weekday: &'static str },

    #[error("Local time does not exist: {0}")]
    NonExistentLocalTime(String),

    #[error("Invalid calendar: {0}")]
    InvalidCalendar(String),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
