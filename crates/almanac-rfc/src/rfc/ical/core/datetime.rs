//! Time-of-day values and wall-clock resolution.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, LocalResult, NaiveDate, NaiveTime, TimeDelta, TimeZone, Timelike};
use chrono_tz::Tz;

use crate::error::{RfcError, RfcResult};

/// Calendar-date-independent time of day.
///
/// Ordering compares hour, then minute, then second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    /// Hour (0-23).
    hour: u8,
    /// Minute (0-59).
    minute: u8,
    /// Second (0-59).
    second: u8,
}

impl TimeOfDay {
    /// Midnight.
    pub const MIDNIGHT: Self = Self {
        hour: 0,
        minute: 0,
        second: 0,
    };

    /// Creates a time of day.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidTimeOfDay` if any component is out of range.
    pub fn new(hour: u8, minute: u8, second: u8) -> RfcResult<Self> {
        if hour > 23 || minute > 59 || second > 59 {
            return Err(RfcError::InvalidTimeOfDay(format!(
                "{hour:02}:{minute:02}:{second:02}"
            )));
        }
        Ok(Self {
            hour,
            minute,
            second,
        })
    }

    /// Creates a time of day from hour and minute.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidTimeOfDay` if any component is out of range.
    pub fn hm(hour: u8, minute: u8) -> RfcResult<Self> {
        Self::new(hour, minute, 0)
    }

    #[must_use]
    pub const fn hour(self) -> u8 {
        self.hour
    }

    #[must_use]
    pub const fn minute(self) -> u8 {
        self.minute
    }

    #[must_use]
    pub const fn second(self) -> u8 {
        self.second
    }

    /// Seconds elapsed since midnight.
    #[must_use]
    pub const fn seconds_from_midnight(self) -> u32 {
        self.hour as u32 * 3600 + self.minute as u32 * 60 + self.second as u32
    }

    #[must_use]
    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from(self)
    }

    /// Parses `HH:MM` or `HH:MM:SS`.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidTimeOfDay` if the text is malformed or a
    /// component is out of range.
    pub fn parse(s: &str) -> RfcResult<Self> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        let (hour, minute, second) = match parts.as_slice() {
            [hour, minute] => (*hour, *minute, "0"),
            [hour, minute, second] => (*hour, *minute, *second),
            _ => return Err(RfcError::InvalidTimeOfDay(s.to_string())),
        };
        let number = |part: &str| {
            part.parse::<u8>()
                .map_err(|e| RfcError::InvalidTimeOfDay(format!("{s}: {e}")))
        };
        Self::new(number(hour)?, number(minute)?, number(second)?)
    }

    /// Returns the time of day of an instant in its own zone.
    #[must_use]
    pub fn of<T: TimeZone>(instant: &DateTime<T>) -> Self {
        Self::from(instant.time())
    }
}

impl From<NaiveTime> for TimeOfDay {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "chrono bounds hour, minute and second well below u8::MAX"
    )]
    fn from(time: NaiveTime) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
            // Leap seconds collapse into :59.
            second: time.second().min(59) as u8,
        }
    }
}

impl From<TimeOfDay> for NaiveTime {
    fn from(time: TimeOfDay) -> Self {
        // Components are range-checked on construction, so this never defaults.
        NaiveTime::from_num_seconds_from_midnight_opt(time.seconds_from_midnight(), 0)
            .unwrap_or_default()
    }
}

impl FromStr for TimeOfDay {
    type Err = RfcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// ## Summary
/// Combines a calendar date and a time of day into an instant in `tz`.
///
/// Ambiguous wall-clock times (DST fold) resolve to the earliest instant.
/// Times inside a DST gap are shifted forward by one hour.
///
/// ## Errors
/// Returns `RfcError::NonExistentLocalTime` if no offset maps the wall-clock
/// time even after the shift.
pub fn at_local(tz: Tz, date: NaiveDate, time: TimeOfDay) -> RfcResult<DateTime<Tz>> {
    let naive = date.and_time(time.to_naive_time());
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Ok(dt),
        LocalResult::None => {
            tracing::trace!(%naive, tz = %tz.name(), "Wall-clock time falls in a DST gap");
            tz.from_local_datetime(&(naive + TimeDelta::hours(1)))
                .earliest()
                .ok_or_else(|| RfcError::NonExistentLocalTime(format!("{naive} {}", tz.name())))
        }
    }
}
