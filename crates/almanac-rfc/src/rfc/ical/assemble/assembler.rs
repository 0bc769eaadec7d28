//! Renders events into `VEVENT` blocks.

use chrono::{DateTime, Utc};

use crate::error::RfcResult;
use crate::rfc::ical::build::{
    ContentLines, escape_param_value, escape_text, fold_description, format_instant,
    format_utc_instant,
};
use crate::rfc::ical::event::Event;
use crate::rfc::ical::timezone::{Clock, SystemClock, resolve_zone};

/// Renders events, stamping each with the clock's current instant.
#[derive(Debug, Default, Clone)]
pub struct EventAssembler<C = SystemClock> {
    clock: C,
}

impl<C: Clock> EventAssembler<C> {
    #[must_use]
    pub const fn new(clock: C) -> Self {
        Self { clock }
    }

    /// ## Summary
    /// Renders `event` as one `VEVENT` per recurrence rule, or a single
    /// `VEVENT` when it does not recur.
    ///
    /// Start and end are written in the event's own zone. An unknown zone
    /// identifier is still written into `TZID` while times are rendered in
    /// UTC. Every block shares the same `DTSTAMP` and detail lines.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidEvent` for an invalid event, or the error of
    /// a rule that cannot be serialized over the event's window.
    #[tracing::instrument(skip_all, fields(title = %event.title, rules = event.recurrences.len()))]
    pub fn assemble(&self, event: &Event) -> RfcResult<String> {
        event.validate()?;

        let (tz, _) = resolve_zone(&event.timezone);
        let start = event.start.with_timezone(&tz);
        let end = event.end.with_timezone(&tz);
        let details = render_details(event, &self.clock.now())?;

        let mut lines = ContentLines::new();
        if event.is_recurring() {
            for rule in &event.recurrences {
                let times = rule.serialize(&start, &end, &event.timezone)?;
                lines
                    .line("BEGIN:VEVENT")
                    .property("UID", event.rule_uid(rule))
                    .raw(&times)
                    .raw(&details)
                    .line("END:VEVENT");
            }
        } else {
            let tzid = escape_param_value(&event.timezone);
            lines
                .line("BEGIN:VEVENT")
                .property("UID", event.uid())
                .line(format!("DTSTART;TZID={tzid}:{}", format_instant(&start)))
                .line(format!("DTEND;TZID={tzid}:{}", format_instant(&end)))
                .raw(&details)
                .line("END:VEVENT");
        }

        tracing::debug!("Assembled event");
        Ok(lines.finish())
    }
}

/// Lines shared by every block of one event.
fn render_details(event: &Event, stamp: &DateTime<Utc>) -> RfcResult<String> {
    let mut lines = ContentLines::new();
    lines
        .property("DTSTAMP", format_utc_instant(stamp))
        .property("SUMMARY", escape_text(&event.title));
    if !event.location.is_empty() {
        lines.property("LOCATION", escape_text(&event.location));
    }
    if let Some(organizer) = &event.organizer {
        lines.line(organizer.organizer_line());
    }
    if !event.description.is_empty() {
        lines.property("DESCRIPTION", fold_description(&event.description));
    }
    for attendee in &event.attendees {
        lines.line(attendee.attendee_line());
    }
    for reminder in &event.reminders {
        lines.raw(&reminder.render()?);
    }
    Ok(lines.finish())
}
