//! Recurrence cadence and weekday model (RFC 5545 §3.3.10).

use std::fmt;
use std::str::FromStr;

use crate::error::{RfcError, RfcResult};

/// Recurrence frequency.
///
/// Only the day-or-coarser cadences are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Returns the string representation used in `FREQ=`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }

    /// Parses a frequency (case-insensitive).
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidFrequency` for anything outside
    /// `DAILY`, `WEEKLY`, `MONTHLY` and `YEARLY`.
    pub fn parse(s: &str) -> RfcResult<Self> {
        Ok(match s.trim().to_ascii_uppercase().as_str() {
            "DAILY" => Self::Daily,
            "WEEKLY" => Self::Weekly,
            "MONTHLY" => Self::Monthly,
            "YEARLY" => Self::Yearly,
            _ => return Err(RfcError::InvalidFrequency(s.to_string())),
        })
    }
}

impl FromStr for Frequency {
    type Err = RfcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Returns the two-letter abbreviation used in `BYDAY=`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sunday => "SU",
            Self::Monday => "MO",
            Self::Tuesday => "TU",
            Self::Wednesday => "WE",
            Self::Thursday => "TH",
            Self::Friday => "FR",
            Self::Saturday => "SA",
        }
    }

    /// Returns the English name of the day.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sunday => "Sunday",
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }

    /// Parses a weekday from its full name, three-letter or two-letter
    /// abbreviation (case-insensitive).
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidDayOfWeek` if the string names no weekday.
    pub fn parse(s: &str) -> RfcResult<Self> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "sunday" | "sun" | "su" => Self::Sunday,
            "monday" | "mon" | "mo" => Self::Monday,
            "tuesday" | "tue" | "tu" => Self::Tuesday,
            "wednesday" | "wed" | "we" => Self::Wednesday,
            "thursday" | "thu" | "th" => Self::Thursday,
            "friday" | "fri" | "fr" => Self::Friday,
            "saturday" | "sat" | "sa" => Self::Saturday,
            _ => return Err(RfcError::InvalidDayOfWeek(s.to_string())),
        })
    }

    /// Returns all weekdays in order (Sunday through Saturday).
    #[must_use]
    pub const fn all() -> [Self; 7] {
        [
            Self::Sunday,
            Self::Monday,
            Self::Tuesday,
            Self::Wednesday,
            Self::Thursday,
            Self::Friday,
            Self::Saturday,
        ]
    }
}

impl FromStr for Weekday {
    type Err = RfcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Sun => Self::Sunday,
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
        }
    }
}

impl From<Weekday> for chrono::Weekday {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Sunday => Self::Sun,
            Weekday::Monday => Self::Mon,
            Weekday::Tuesday => Self::Tue,
            Weekday::Wednesday => Self::Wed,
            Weekday::Thursday => Self::Thu,
            Weekday::Friday => Self::Fri,
            Weekday::Saturday => Self::Sat,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
