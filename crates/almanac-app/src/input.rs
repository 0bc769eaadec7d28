//! JSON events file.
//!
//! Start and end are local wall-clock date-times (`2024-07-01T10:00:00`) in
//! the event's zone; rule times are `HH:MM` or `HH:MM:SS`.

use almanac_core::error::CoreError;
use almanac_rfc::rfc::ical::core::{TimeOfDay, at_local};
use almanac_rfc::rfc::ical::event::{Event, Participant, Reminder, ReminderAction, Repeat};
use almanac_rfc::rfc::ical::recurrence::RecurrenceRule;
use almanac_rfc::rfc::ical::timezone::resolve_zone;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::Deserialize;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Deserialize)]
pub struct EventsFile {
    pub events: Vec<EventInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    pub timezone: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub recurrences: Vec<RuleInput>,
    #[serde(default)]
    pub attendees: Vec<ParticipantInput>,
    #[serde(default)]
    pub organizer: Option<ParticipantInput>,
    #[serde(default)]
    pub reminders: Vec<ReminderInput>,
    /// Dates whose occurrence is cancelled.
    #[serde(default)]
    pub cancellations: Vec<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuleInput {
    pub frequency: String,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub exceptions: Vec<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParticipantInput {
    #[serde(default)]
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReminderInput {
    pub action: String,
    pub description: String,
    /// Minutes relative to the event start; negative fires before it.
    pub trigger_minutes: i64,
    #[serde(default)]
    pub repeat: Option<u32>,
    #[serde(default)]
    pub repeat_interval_minutes: Option<i64>,
    #[serde(default)]
    pub attendees: Vec<ParticipantInput>,
}

impl EventInput {
    /// ## Summary
    /// Builds the domain event, resolving wall-clock times in its zone.
    ///
    /// ## Errors
    /// Returns an error for any invalid rule, participant, reminder or
    /// cancellation, or if the event itself is invalid.
    pub fn into_event(self) -> AppResult<Event> {
        let (tz, _) = resolve_zone(&self.timezone);
        let start = at_local(tz, self.start.date(), TimeOfDay::from(self.start.time()))?;
        let end = at_local(tz, self.end.date(), TimeOfDay::from(self.end.time()))?;

        let mut event = Event::new(self.title, self.timezone, start, end)
            .with_description(self.description)
            .with_location(self.location);
        for rule in self.recurrences {
            event = event.with_recurrence(rule.into_rule()?);
        }
        for attendee in &self.attendees {
            event.add_attendee(&attendee.name, &attendee.email)?;
        }
        if let Some(organizer) = &self.organizer {
            event.add_organizer(&organizer.name, &organizer.email)?;
        }
        for reminder in self.reminders {
            event.add_reminder(reminder.into_reminder()?)?;
        }
        for date in self.cancellations {
            event.cancel_on_date(date)?;
        }

        event.validate()?;
        Ok(event)
    }
}

impl RuleInput {
    /// ## Summary
    /// Builds a validated recurrence rule.
    ///
    /// ## Errors
    /// Returns an error for an unknown frequency or weekday, or a malformed
    /// or empty time slot.
    pub fn into_rule(self) -> AppResult<RecurrenceRule> {
        let rule = RecurrenceRule::parse(
            &self.frequency,
            &self.day,
            TimeOfDay::parse(&self.start_time)?,
            TimeOfDay::parse(&self.end_time)?,
        )?;
        Ok(self
            .exceptions
            .into_iter()
            .fold(rule, RecurrenceRule::with_exception))
    }
}

impl ReminderInput {
    /// ## Summary
    /// Builds a reminder. Validation is left to the event it is added to.
    ///
    /// ## Errors
    /// Returns an error for an unknown action, an out-of-range minute count,
    /// or a malformed attendee address.
    pub fn into_reminder(self) -> AppResult<Reminder> {
        let action = ReminderAction::parse(&self.action)?;
        let mut reminder = Reminder::new(action, self.description, minutes(self.trigger_minutes)?);

        if let Some(count) = self.repeat {
            let mut repeat = Repeat::new(count);
            if let Some(interval) = self.repeat_interval_minutes {
                repeat.interval = minutes(interval)?;
            }
            reminder = reminder.with_repeat(repeat);
        }
        for attendee in self.attendees {
            reminder = reminder.with_attendee(Participant::new(attendee.name, attendee.email)?);
        }
        Ok(reminder)
    }
}

fn minutes(value: i64) -> AppResult<TimeDelta> {
    TimeDelta::try_minutes(value).ok_or_else(|| {
        CoreError::InvalidInput(format!("{value} minutes is out of range")).into()
    })
}

/// ## Summary
/// Parses an events document into validated events.
///
/// ## Errors
/// Returns `AppError::ParseError` for malformed JSON, `CoreError::InvalidInput`
/// for a document without events, or the first event conversion error.
pub fn parse_events(json: &str) -> AppResult<Vec<Event>> {
    let file: EventsFile = serde_json::from_str(json)?;
    if file.events.is_empty() {
        return Err(CoreError::InvalidInput("events file contains no events".to_string()).into());
    }

    file.events
        .into_iter()
        .enumerate()
        .map(|(i, input)| {
            tracing::trace!(index = i, title = %input.title, "Converting event");
            input.into_event()
        })
        .collect()
}

/// ## Summary
/// Reads and parses the events file at `path`.
///
/// ## Errors
/// Returns `AppError::IoError` if the file cannot be read, or any error of
/// `parse_events`.
pub fn load_events(path: &str) -> AppResult<Vec<Event>> {
    let json = std::fs::read_to_string(path).map_err(|source| AppError::IoError {
        path: path.to_string(),
        source,
    })?;
    let events = parse_events(&json)?;
    tracing::debug!(path, count = events.len(), "Loaded events");
    Ok(events)
}
