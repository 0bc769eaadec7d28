//! iCalendar DURATION value type (RFC 5545 §3.3.6).

use std::fmt;

use chrono::TimeDelta;

/// Duration value (RFC 5545 §3.3.6).
///
/// Stored decomposed into day/hour/minute/second components with a sign.
/// Week designators are never produced; seven days render as `P7D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Duration {
    /// Whether this duration is negative.
    pub negative: bool,
    /// Number of days.
    pub days: u64,
    /// Number of hours (0-23).
    pub hours: u64,
    /// Number of minutes (0-59).
    pub minutes: u64,
    /// Number of seconds (0-59).
    pub seconds: u64,
}

impl Duration {
    /// Creates a new zero duration.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            negative: false,
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }

    /// Decomposes a signed number of seconds.
    #[must_use]
    pub const fn from_seconds(total: i64) -> Self {
        let negative = total < 0;
        let abs = total.unsigned_abs();
        Self {
            negative,
            days: abs / 86_400,
            hours: (abs % 86_400) / 3600,
            minutes: (abs % 3600) / 60,
            seconds: abs % 60,
        }
    }

    /// Negates this duration.
    #[must_use]
    pub const fn negate(mut self) -> Self {
        self.negative = !self.negative;
        self
    }

    /// Returns whether every component is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.days == 0 && self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }
}

impl From<TimeDelta> for Duration {
    /// Sub-second precision is truncated toward zero.
    fn from(delta: TimeDelta) -> Self {
        Self::from_seconds(delta.num_seconds())
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative && !self.is_zero() {
            write!(f, "-")?;
        }
        write!(f, "P")?;

        if self.days > 0 {
            write!(f, "{}D", self.days)?;
        }

        let has_time = self.hours > 0 || self.minutes > 0 || self.seconds > 0;
        if has_time || self.days == 0 {
            write!(f, "T")?;
        }
        if self.hours > 0 {
            write!(f, "{}H", self.hours)?;
        }
        if self.minutes > 0 {
            write!(f, "{}M", self.minutes)?;
        }
        // Seconds are always written when no larger unit is present, so
        // `T` is never left without a designator.
        if self.seconds > 0 || (self.days == 0 && self.hours == 0 && self.minutes == 0) {
            write!(f, "{}S", self.seconds)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_display_days_time() {
        let d = Duration::from(TimeDelta::hours(26) + TimeDelta::minutes(30));
        assert_eq!(d.to_string(), "P1DT2H30M");
    }

    #[test]
    fn duration_display_time_only() {
        assert_eq!(Duration::from(TimeDelta::minutes(15)).to_string(), "PT15M");
    }

    #[test]
    fn duration_display_negative() {
        assert_eq!(Duration::from(TimeDelta::minutes(-15)).to_string(), "-PT15M");
        assert_eq!(
            Duration::from(TimeDelta::minutes(15)).negate().to_string(),
            "-PT15M"
        );
    }

    #[test]
    fn duration_display_whole_days() {
        assert_eq!(Duration::from(TimeDelta::hours(25)).to_string(), "P1DT1H");
        assert_eq!(Duration::from(TimeDelta::days(2)).to_string(), "P2D");
        assert_eq!(Duration::from(TimeDelta::days(7)).to_string(), "P7D");
    }

    #[test]
    fn duration_display_zero() {
        assert_eq!(Duration::zero().to_string(), "PT0S");
        assert_eq!(Duration::zero().negate().to_string(), "PT0S");
    }

    #[test]
    fn duration_display_seconds() {
        assert_eq!(Duration::from(TimeDelta::seconds(45)).to_string(), "PT45S");
        assert_eq!(Duration::from(TimeDelta::seconds(3661)).to_string(), "PT1H1M1S");
    }

    #[test]
    fn duration_decomposition() {
        let d = Duration::from_seconds(-(86_400 + 3600 + 60 + 1));
        assert!(d.negative);
        assert_eq!((d.days, d.hours, d.minutes, d.seconds), (1, 1, 1, 1));
    }
}
