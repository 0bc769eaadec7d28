//! Calendar events and their validation.

use almanac_core::constants::UID_SUFFIX;
use chrono::{DateTime, Datelike, NaiveDate};
use chrono_tz::Tz;

use super::participant::Participant;
use super::reminder::Reminder;
use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::core::{TimeOfDay, Weekday};
use crate::rfc::ical::recurrence::RecurrenceRule;

/// A scheduled event, single or recurring.
///
/// The event is recurring iff `recurrences` is non-empty. For a recurring
/// event `start` and `end` bound the window in which its rules occur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub title: String,
    pub description: String,
    pub location: String,
    /// Time-zone identifier written into every `TZID` parameter.
    pub timezone: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub recurrences: Vec<RecurrenceRule>,
    pub attendees: Vec<Participant>,
    pub organizer: Option<Participant>,
    pub reminders: Vec<Reminder>,
}

impl Event {
    /// Creates a single event with empty details. Not validated.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        timezone: impl Into<String>,
        start: DateTime<Tz>,
        end: DateTime<Tz>,
    ) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            location: String::new(),
            timezone: timezone.into(),
            start,
            end,
            recurrences: Vec::new(),
            attendees: Vec::new(),
            organizer: None,
            reminders: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    #[must_use]
    pub fn with_recurrence(mut self, rule: RecurrenceRule) -> Self {
        self.recurrences.push(rule);
        self
    }

    #[must_use]
    pub fn is_recurring(&self) -> bool {
        !self.recurrences.is_empty()
    }

    /// ## Summary
    /// Checks the event and everything it owns.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidEvent` naming the first violated invariant.
    /// Failures of nested rules, reminders and participants are wrapped with
    /// their position.
    pub fn validate(&self) -> RfcResult<()> {
        if self.title.trim().is_empty() {
            return Err(RfcError::InvalidEvent("title is empty".to_string()));
        }
        if self.end <= self.start {
            return Err(RfcError::InvalidEvent(format!(
                "end {} is not after start {}",
                self.end, self.start
            )));
        }
        if self.timezone.trim().is_empty() {
            return Err(RfcError::InvalidEvent("time zone is empty".to_string()));
        }

        for (i, rule) in self.recurrences.iter().enumerate() {
            rule.validate()
                .map_err(|e| RfcError::InvalidEvent(format!("recurrence {i}: {e}")))?;
        }
        for (i, reminder) in self.reminders.iter().enumerate() {
            reminder
                .validate()
                .map_err(|e| RfcError::InvalidEvent(format!("reminder {i}: {e}")))?;
        }
        for (i, attendee) in self.attendees.iter().enumerate() {
            attendee
                .validate()
                .map_err(|e| RfcError::InvalidEvent(format!("attendee {i}: {e}")))?;
        }
        if let Some(organizer) = &self.organizer {
            organizer
                .validate()
                .map_err(|e| RfcError::InvalidEvent(format!("organizer: {e}")))?;
        }
        Ok(())
    }

    /// ## Summary
    /// Cancels the occurrence on `date` by adding it to the exceptions of the
    /// first rule recurring on that weekday.
    ///
    /// ## Errors
    /// Returns `RfcError::NoRecurrenceFoundForException` if no rule falls on
    /// the weekday of `date`.
    pub fn cancel_on_date(&mut self, date: NaiveDate) -> RfcResult<()> {
        let weekday = Weekday::from(date.weekday());
        let rule = self
            .recurrences
            .iter_mut()
            .find(|rule| rule.day == weekday)
            .ok_or(RfcError::NoRecurrenceFoundForException(date))?;

        if !rule.add_exception(date) {
            tracing::debug!(%date, "Date was already cancelled");
        }
        Ok(())
    }

    /// ## Summary
    /// Adds an attendee.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidEmail` if the address is malformed.
    pub fn add_attendee(&mut self, name: &str, email: &str) -> RfcResult<()> {
        self.attendees.push(Participant::new(name, email)?);
        Ok(())
    }

    /// ## Summary
    /// Sets the organizer, replacing any previous one.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidEmail` if the address is malformed.
    pub fn add_organizer(&mut self, name: &str, email: &str) -> RfcResult<()> {
        self.organizer = Some(Participant::new(name, email)?);
        Ok(())
    }

    /// ## Summary
    /// Attaches a reminder.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidReminder` if the reminder is invalid.
    pub fn add_reminder(&mut self, reminder: Reminder) -> RfcResult<()> {
        reminder
            .validate()
            .map_err(|e| match e {
                RfcError::InvalidReminder(_) => e,
                other => RfcError::InvalidReminder(other.to_string()),
            })?;
        self.reminders.push(reminder);
        Ok(())
    }

    /// UID of a single event's block.
    #[must_use]
    pub fn uid(&self) -> String {
        format!(
            "{}-{}-{}{UID_SUFFIX}",
            self.uid_title(),
            Weekday::from(self.start.weekday()).name(),
            Weekday::from(self.end.weekday()).name()
        )
    }

    /// UID of the block rendered for one of this event's rules.
    #[must_use]
    pub fn rule_uid(&self, rule: &RecurrenceRule) -> String {
        format!(
            "{}-{}-{}-{}-{}{UID_SUFFIX}",
            self.uid_title(),
            rule.frequency,
            rule.day,
            uid_time(rule.start_time),
            uid_time(rule.end_time)
        )
    }

    fn uid_title(&self) -> String {
        self.title.replace(' ', "_")
    }
}

fn uid_time(time: TimeOfDay) -> String {
    format!("{:02}_{:02}", time.hour(), time.minute())
}
