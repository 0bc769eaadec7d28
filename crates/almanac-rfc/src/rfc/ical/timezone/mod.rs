//! Time-zone definitions and the wall clock.
//!
//! Both are collaborators injected into rendering: the directory supplies
//! `VTIMEZONE` text per identifier, the clock supplies `DTSTAMP`.

mod clock;
mod definitions;
mod directory;

pub use clock::{Clock, FixedClock, SystemClock};
pub use directory::{EmbeddedTimeZones, TimeZoneDirectory, resolve_zone};
