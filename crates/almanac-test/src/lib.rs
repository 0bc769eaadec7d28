//! Almanac calendar generator - integration test support.
//!
//! This crate re-exports the workspace crates so integration tests can use
//! `almanac_test::` paths, plus a few fixtures shared between test files.

pub use almanac_app as app;
pub use almanac_core as common;
pub use almanac_rfc as rfc;

pub mod fixtures {
    use almanac_rfc::rfc::ical::assemble::EventAssembler;
    use almanac_rfc::rfc::ical::core::{Frequency, TimeOfDay, Weekday};
    use almanac_rfc::rfc::ical::recurrence::RecurrenceRule;
    use almanac_rfc::rfc::ical::timezone::FixedClock;
    use chrono::{DateTime, TimeZone, Utc};
    use chrono_tz::Tz;

    /// Instant used for every `DTSTAMP` in tests.
    #[must_use]
    pub fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 8, 30, 0)
            .single()
            .unwrap_or_default()
    }

    #[must_use]
    pub fn fixed_assembler() -> EventAssembler<FixedClock> {
        EventAssembler::new(FixedClock(stamp()))
    }

    /// Wall-clock instant in `tz`; the earliest mapping for ambiguous times.
    ///
    /// ## Panics
    /// Panics if the wall-clock time does not exist in `tz`.
    #[must_use]
    pub fn local(tz: Tz, y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Tz> {
        let Some(dt) = tz.with_ymd_and_hms(y, m, d, h, min, 0).earliest() else {
            panic!("{y}-{m}-{d} {h}:{min} does not exist in {tz}");
        };
        dt
    }

    #[must_use]
    pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Tz> {
        local(chrono_tz::UTC, y, m, d, h, min)
    }

    /// Weekly rule on `day` from `start` to `end` (hour, minute).
    ///
    /// ## Panics
    /// Panics if the slot is invalid.
    #[must_use]
    pub fn weekly(day: Weekday, start: (u8, u8), end: (u8, u8)) -> RecurrenceRule {
        let slot = TimeOfDay::hm(start.0, start.1)
            .and_then(|s| TimeOfDay::hm(end.0, end.1).map(|e| (s, e)))
            .and_then(|(s, e)| RecurrenceRule::new(Frequency::Weekly, day, s, e));
        match slot {
            Ok(rule) => rule,
            Err(err) => panic!("invalid test rule: {err}"),
        }
    }
}
