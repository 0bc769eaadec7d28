//! iCalendar (RFC 5545) generation.
//!
//! Leaves first:
//! - `core`: frequency, weekday, time-of-day and duration value types
//! - `build`: text escaping, description folding, instant/duration formatting
//! - `recurrence`: weekday anchoring, occurrence stepping, RRULE serialization
//! - `event`: events, participants and reminders with their validation
//! - `conflict`: pairwise overlap detection between events
//! - `assemble`: VEVENT block rendering
//! - `timezone`: VTIMEZONE directory and the clock collaborator
//! - `calendar`: VCALENDAR aggregation

pub mod assemble;
pub mod build;
pub mod calendar;
pub mod conflict;
pub mod core;
pub mod event;
pub mod recurrence;
pub mod timezone;
