//! iCalendar core value types (RFC 5545).
//!
//! These are the leaves every other module builds on:
//! - `Frequency` and `Weekday`: the valid recurrence cadences and days
//! - `TimeOfDay`: a date-independent wall-clock time
//! - `Duration`: signed day/time durations for TRIGGER and DURATION

mod datetime;
mod duration;
mod rrule;

pub use datetime::{TimeOfDay, at_local};
pub use duration::Duration;
pub use rrule::{Frequency, Weekday};
