//! Calendar: an ordered collection of events rendered as one `VCALENDAR`.

use almanac_core::constants::DEFAULT_PRODID;
use chrono::DateTime;
use chrono_tz::Tz;

use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::assemble::EventAssembler;
use crate::rfc::ical::build::{ContentLines, escape_text};
use crate::rfc::ical::conflict::{ConflictPair, detect, find_conflicts};
use crate::rfc::ical::event::Event;
use crate::rfc::ical::timezone::{Clock, TimeZoneDirectory};

/// A named collection of validated events.
#[derive(Debug, Clone)]
pub struct Calendar {
    pub name: String,
    pub description: String,
    pub prodid: String,
    events: Vec<Event>,
}

impl Calendar {
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            prodid: DEFAULT_PRODID.to_string(),
            events: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_prodid(mut self, prodid: impl Into<String>) -> Self {
        self.prodid = prodid.into();
        self
    }

    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// ## Summary
    /// Appends an event after validating it.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidEvent` if the event is invalid.
    pub fn add_event(&mut self, event: Event) -> RfcResult<()> {
        event.validate()?;
        tracing::debug!(title = %event.title, "Added event");
        self.events.push(event);
        Ok(())
    }

    /// ## Summary
    /// Checks that the calendar is named, non-empty and holds valid events.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidCalendar` naming the violated invariant.
    pub fn validate(&self) -> RfcResult<()> {
        if self.name.trim().is_empty() {
            return Err(RfcError::InvalidCalendar("name is empty".to_string()));
        }
        if self.events.is_empty() {
            return Err(RfcError::InvalidCalendar("calendar has no events".to_string()));
        }
        for (i, event) in self.events.iter().enumerate() {
            event
                .validate()
                .map_err(|e| RfcError::InvalidCalendar(format!("event {i}: {e}")))?;
        }
        Ok(())
    }

    /// ## Summary
    /// Returns every conflicting pair of events, each unordered pair once.
    ///
    /// ## Errors
    /// Returns the first error raised while comparing events.
    pub fn conflicts(&self) -> RfcResult<Vec<ConflictPair>> {
        find_conflicts(&self.events)
    }

    /// ## Summary
    /// Visits each unordered pair of events in the same order as
    /// `conflicts` (by first index, then second) and hands every
    /// conflicting pair to `resolve` together with the conflict instant.
    ///
    /// Each pair is compared against the state left by earlier callbacks, so
    /// a callback that cancels a date can clear later conflicts. Returns the
    /// number of conflicts handed to `resolve`.
    ///
    /// ## Errors
    /// Returns the first error raised while comparing events.
    pub fn resolve_conflicts<F>(&mut self, mut resolve: F) -> RfcResult<usize>
    where
        F: FnMut(&mut Event, &mut Event, DateTime<Tz>),
    {
        let mut resolved = 0;
        let count = self.events.len();
        for first in 0..count {
            for second in first + 1..count {
                let (head, tail) = self.events.split_at_mut(second);
                let (Some(a), Some(b)) = (head.get_mut(first), tail.first_mut()) else {
                    continue;
                };
                if let Some(at) = detect(a, b)? {
                    resolve(a, b, at);
                    resolved += 1;
                }
            }
        }
        Ok(resolved)
    }

    /// ## Summary
    /// Renders the calendar: header, one `VTIMEZONE` per distinct definition
    /// used by the events, then every event's blocks.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidCalendar` for an invalid calendar, or the
    /// first error raised while assembling an event.
    #[tracing::instrument(skip_all, fields(name = %self.name, events = self.events.len()))]
    pub fn render<C, D>(&self, assembler: &EventAssembler<C>, directory: &D) -> RfcResult<String>
    where
        C: Clock,
        D: TimeZoneDirectory,
    {
        self.validate()?;

        let mut lines = ContentLines::new();
        lines
            .line("BEGIN:VCALENDAR")
            .property("VERSION", "2.0")
            .property("PRODID", &self.prodid)
            .property("CALSCALE", "GREGORIAN")
            .property("METHOD", "PUBLISH")
            .property("X-WR-CALNAME", escape_text(&self.name));
        if !self.description.is_empty() {
            lines.property("X-WR-CALDESC", escape_text(&self.description));
        }

        let mut definitions: Vec<&str> = Vec::new();
        for event in &self.events {
            let (text, found) = directory.lookup(&event.timezone);
            if !found {
                tracing::debug!(tzid = %event.timezone, "Using fallback time-zone definition");
            }
            if !definitions.contains(&text) {
                definitions.push(text);
            }
        }
        for text in &definitions {
            lines.raw(text);
        }

        for event in &self.events {
            lines.raw(&assembler.assemble(event)?);
        }
        lines.line("END:VCALENDAR");

        tracing::debug!(timezones = definitions.len(), "Rendered calendar");
        Ok(lines.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::ical::core::{Frequency, TimeOfDay, Weekday};
    use crate::rfc::ical::recurrence::RecurrenceRule;
    use crate::rfc::ical::timezone::{EmbeddedTimeZones, FixedClock};
    use chrono::{TimeZone, Utc};

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Tz> {
        chrono_tz::UTC.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn assembler() -> EventAssembler<FixedClock> {
        EventAssembler::new(FixedClock(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()))
    }

    fn standup() -> Event {
        Event::new("Standup", "UTC", utc(2025, 6, 2, 0, 0), utc(2025, 6, 20, 0, 0)).with_recurrence(
            RecurrenceRule::new(
                Frequency::Weekly,
                Weekday::Monday,
                TimeOfDay::hm(9, 0).unwrap(),
                TimeOfDay::hm(10, 0).unwrap(),
            )
            .unwrap(),
        )
    }

    fn review() -> Event {
        Event::new(
            "Review",
            "America/New_York",
            utc(2025, 6, 9, 9, 30),
            utc(2025, 6, 9, 10, 30),
        )
    }

    #[test_log::test]
    fn add_event_validates() {
        let mut calendar = Calendar::new("Work", "");
        let broken = Event::new("", "UTC", utc(2025, 6, 2, 9, 0), utc(2025, 6, 2, 10, 0));
        assert!(matches!(
            calendar.add_event(broken),
            Err(RfcError::InvalidEvent(_))
        ));
        assert!(calendar.events().is_empty());
    }

    #[test_log::test]
    fn empty_or_unnamed_calendar_is_invalid() {
        let calendar = Calendar::new("Work", "");
        assert!(matches!(
            calendar.validate(),
            Err(RfcError::InvalidCalendar(_))
        ));

        let mut unnamed = Calendar::new(" ", "");
        unnamed.add_event(review()).unwrap();
        assert!(matches!(
            unnamed.render(&assembler(), &EmbeddedTimeZones::new()),
            Err(RfcError::InvalidCalendar(_))
        ));
    }

    #[test_log::test]
    fn render_wraps_events() {
        let mut calendar = Calendar::new("Work", "Team things");
        calendar.add_event(standup()).unwrap();
        calendar.add_event(review()).unwrap();
        calendar.add_event(standup()).unwrap();

        let text = calendar
            .render(&assembler(), &EmbeddedTimeZones::new())
            .unwrap();
        assert!(text.starts_with(
            "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//almanac//Calendar//EN\r\n\
             CALSCALE:GREGORIAN\r\nMETHOD:PUBLISH\r\nX-WR-CALNAME:Work\r\n\
             X-WR-CALDESC:Team things\r\n"
        ));
        assert!(text.ends_with("END:VEVENT\r\nEND:VCALENDAR\r\n"));
        assert_eq!(text.matches("BEGIN:VTIMEZONE\r\n").count(), 2);
        assert_eq!(text.matches("BEGIN:VEVENT\r\n").count(), 3);
        assert!(text.find("END:VTIMEZONE").unwrap() < text.find("BEGIN:VEVENT").unwrap());
    }

    #[test_log::test]
    fn unknown_zones_share_fallback_definition() {
        let mut calendar = Calendar::new("Work", "");
        let mut a = review();
        a.timezone = "Nowhere/One".to_string();
        let mut b = review();
        b.timezone = "UTC".to_string();
        calendar.add_event(a).unwrap();
        calendar.add_event(b).unwrap();

        let text = calendar
            .render(&assembler(), &EmbeddedTimeZones::new())
            .unwrap();
        assert_eq!(text.matches("BEGIN:VTIMEZONE\r\n").count(), 1);
        assert!(text.contains("DTSTART;TZID=Nowhere/One:"));
    }

    #[test_log::test]
    fn conflicts_listed_once_per_pair() {
        let mut calendar = Calendar::new("Work", "");
        calendar.add_event(standup()).unwrap();
        calendar.add_event(review()).unwrap();

        let pairs = calendar.conflicts().unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!((pairs[0].first, pairs[0].second), (0, 1));
        assert_eq!(pairs[0].at, utc(2025, 6, 9, 9, 0));
    }

    #[test_log::test]
    fn resolve_conflicts_visits_pairs_in_scan_order() {
        let mut calendar = Calendar::new("Work", "");
        for (title, minute) in [("A", 0), ("B", 10), ("C", 20), ("D", 30)] {
            let event = Event::new(
                title,
                "UTC",
                utc(2025, 6, 2, 9, minute),
                utc(2025, 6, 2, 11, 0),
            );
            calendar.add_event(event).unwrap();
        }

        let scanned: Vec<(String, String)> = calendar
            .conflicts()
            .unwrap()
            .iter()
            .map(|pair| {
                let events = calendar.events();
                (events[pair.first].title.clone(), events[pair.second].title.clone())
            })
            .collect();

        let mut visited = Vec::new();
        let handled = calendar
            .resolve_conflicts(|a, b, _| visited.push((a.title.clone(), b.title.clone())))
            .unwrap();

        assert_eq!(handled, 6);
        assert_eq!(visited, scanned);
        assert_eq!(visited[2], ("A".to_string(), "D".to_string()));
        assert_eq!(visited[3], ("B".to_string(), "C".to_string()));
    }

    #[test_log::test]
    fn resolve_conflicts_can_cancel_dates() {
        let mut calendar = Calendar::new("Work", "");
        calendar.add_event(standup()).unwrap();
        calendar.add_event(review()).unwrap();

        let handled = calendar
            .resolve_conflicts(|recurring, _single, at| {
                recurring.cancel_on_date(at.date_naive()).unwrap();
            })
            .unwrap();
        assert_eq!(handled, 1);

        let rule = &calendar.events()[0].recurrences[0];
        assert!(rule.is_exception(utc(2025, 6, 9, 0, 0).date_naive()));
    }
}
