//! Weekly-style recurrence rules and their RRULE serialization.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;

use super::anchor::{anchor_end, anchor_start};
use super::occurrences::Occurrences;
use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::build::{
    ContentLines, escape_param_value, format_instant, format_naive, format_utc_instant,
};
use crate::rfc::ical::core::{Frequency, TimeOfDay, Weekday, at_local};

/// Recurrence rule: a cadence anchored to one weekday with a daily time slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    /// Weekday every occurrence falls on.
    pub day: Weekday,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    /// Calendar dates on which the series does not occur.
    pub exceptions: BTreeSet<NaiveDate>,
}

impl RecurrenceRule {
    /// ## Summary
    /// Creates a validated rule without exceptions.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidRecurrence` if `end_time` is not after `start_time`.
    pub fn new(
        frequency: Frequency,
        day: Weekday,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
    ) -> RfcResult<Self> {
        let rule = Self {
            frequency,
            day,
            start_time,
            end_time,
            exceptions: BTreeSet::new(),
        };
        rule.validate()?;
        Ok(rule)
    }

    /// ## Summary
    /// Creates a validated rule from textual frequency and weekday.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidRecurrence` for an unknown frequency or a
    /// non-positive time slot, and `RfcError::InvalidDayOfWeek` for an
    /// unparseable weekday.
    pub fn parse(
        frequency: &str,
        day: &str,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
    ) -> RfcResult<Self> {
        let frequency =
            Frequency::parse(frequency).map_err(|e| RfcError::InvalidRecurrence(e.to_string()))?;
        let day = Weekday::parse(day)?;
        Self::new(frequency, day, start_time, end_time)
    }

    /// Adds an exception date.
    #[must_use]
    pub fn with_exception(mut self, date: NaiveDate) -> Self {
        self.exceptions.insert(date);
        self
    }

    /// ## Summary
    /// Checks the rule's invariants.
    ///
    /// Frequency and weekday are closed enums, so only the time slot can be
    /// violated here.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidRecurrence` if `end_time` is not strictly
    /// after `start_time`.
    pub fn validate(&self) -> RfcResult<()> {
        if self.end_time <= self.start_time {
            return Err(RfcError::InvalidRecurrence(format!(
                "end of day {} is not after start of day {}",
                self.end_time, self.start_time
            )));
        }
        Ok(())
    }

    /// Records `date` as an exception. Returns `false` if it already was one.
    pub fn add_exception(&mut self, date: NaiveDate) -> bool {
        self.exceptions.insert(date)
    }

    #[must_use]
    pub fn is_exception(&self, date: NaiveDate) -> bool {
        self.exceptions.contains(&date)
    }

    /// ## Summary
    /// Returns this rule's start time of day if both rules fall on the same
    /// weekday and their time slots overlap.
    ///
    /// Slots are compared by hour, minute and second only; touching slots
    /// (one ends when the other starts) do not overlap.
    #[must_use]
    pub fn conflicts_with(&self, other: &Self) -> Option<TimeOfDay> {
        (self.day == other.day
            && self.start_time < other.end_time
            && other.start_time < self.end_time)
            .then_some(self.start_time)
    }

    /// ## Summary
    /// Returns the occurrences of this rule within `[window_start, window_end]`.
    ///
    /// ## Errors
    /// Returns an error if the weekday cannot be anchored to the window start.
    pub fn occurrences<'a>(
        &'a self,
        window_start: &DateTime<Tz>,
        window_end: &DateTime<Tz>,
    ) -> RfcResult<Occurrences<'a>> {
        Occurrences::new(self, window_start, window_end)
    }

    /// ## Summary
    /// Serializes the rule for the window `[window_start, window_end]` as
    /// `DTSTART`, `DTEND`, `RRULE` and one `EXDATE` per exception, each line
    /// CRLF-terminated.
    ///
    /// `tzid` is written verbatim into every `TZID` parameter.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidRecurrence` for an invalid rule and
    /// `RfcError::EndBeforeStart` if the anchored end precedes the anchored start.
    #[tracing::instrument(skip(self), fields(freq = %self.frequency, day = %self.day))]
    pub fn serialize(
        &self,
        window_start: &DateTime<Tz>,
        window_end: &DateTime<Tz>,
        tzid: &str,
    ) -> RfcResult<String> {
        self.validate()?;

        let start = anchor_start(window_start, self.day, self.start_time)?;
        // The last occurrence bounds the series; UNTIL is the end of its slot.
        let last = anchor_end(window_end, self.day, self.start_time)?;
        let until = at_local(last.timezone(), last.date_naive(), self.end_time)?;
        if last < start {
            return Err(RfcError::EndBeforeStart {
                end: format_instant(&until),
                start: format_instant(&start),
            });
        }
        let end = at_local(start.timezone(), start.date_naive(), self.end_time)?;

        let tzid = escape_param_value(tzid);
        let mut lines = ContentLines::new();
        lines
            .line(format!("DTSTART;TZID={tzid}:{}", format_instant(&start)))
            .line(format!("DTEND;TZID={tzid}:{}", format_instant(&end)))
            .property("RRULE", self.rrule_value(&until));

        for date in &self.exceptions {
            let excluded = date.and_time(self.start_time.to_naive_time());
            lines.line(format!("EXDATE;TZID={tzid}:{}", format_naive(&excluded)));
        }

        tracing::debug!(exceptions = self.exceptions.len(), "Serialized recurrence rule");
        Ok(lines.finish())
    }

    /// RRULE value bounded by `until`, rendered in UTC.
    fn rrule_value(&self, until: &DateTime<Tz>) -> String {
        format!(
            "FREQ={};BYDAY={};UNTIL={};",
            self.frequency,
            self.day,
            format_utc_instant(until)
        )
    }
}
