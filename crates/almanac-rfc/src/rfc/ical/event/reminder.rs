//! Alarm reminders (RFC 5545 §3.6.6).

use std::fmt;
use std::str::FromStr;

use chrono::TimeDelta;

use super::participant::Participant;
use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::build::{ContentLines, fold_description, format_duration};

/// What the client does when an alarm fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReminderAction {
    Display,
    /// Requires at least one attendee.
    Email,
    Audio,
}

impl ReminderAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Display => "DISPLAY",
            Self::Email => "EMAIL",
            Self::Audio => "AUDIO",
        }
    }

    /// Parses an action name (case-insensitive).
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidReminder` for an unknown action.
    pub fn parse(s: &str) -> RfcResult<Self> {
        Ok(match s.trim().to_ascii_uppercase().as_str() {
            "DISPLAY" => Self::Display,
            "EMAIL" => Self::Email,
            "AUDIO" => Self::Audio,
            _ => return Err(RfcError::InvalidReminder(format!("unknown action {s:?}"))),
        })
    }
}

impl FromStr for ReminderAction {
    type Err = RfcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ReminderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Additional firings after the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Repeat {
    pub count: u32,
    /// Delay between firings.
    pub interval: TimeDelta,
}

impl Repeat {
    /// Delay used when the caller names only a count.
    pub const DEFAULT_INTERVAL: TimeDelta = TimeDelta::minutes(15);

    #[must_use]
    pub const fn new(count: u32) -> Self {
        Self {
            count,
            interval: Self::DEFAULT_INTERVAL,
        }
    }
}

/// A VALARM attached to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub description: String,
    pub action: ReminderAction,
    /// Offset from the event start; negative values fire before it.
    pub trigger: TimeDelta,
    pub repeat: Option<Repeat>,
    /// Recipients of an `EMAIL` action.
    pub attendees: Vec<Participant>,
}

impl Reminder {
    /// Creates a reminder without repeats or attendees. Not validated.
    #[must_use]
    pub fn new(action: ReminderAction, description: impl Into<String>, trigger: TimeDelta) -> Self {
        Self {
            description: description.into(),
            action,
            trigger,
            repeat: None,
            attendees: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = Some(repeat);
        self
    }

    #[must_use]
    pub fn with_attendee(mut self, attendee: Participant) -> Self {
        self.attendees.push(attendee);
        self
    }

    /// ## Summary
    /// Checks the reminder's invariants.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidReminder` if the description is empty, the
    /// trigger is zero, the repeat interval is not positive, or the attendee
    /// list does not match the action. Returns `RfcError::InvalidEmail` for a
    /// malformed attendee address.
    pub fn validate(&self) -> RfcResult<()> {
        if self.description.is_empty() {
            return Err(RfcError::InvalidReminder("description is empty".to_string()));
        }
        if self.trigger.is_zero() {
            return Err(RfcError::InvalidReminder("trigger is zero".to_string()));
        }
        if let Some(repeat) = &self.repeat
            && repeat.interval <= TimeDelta::zero()
        {
            return Err(RfcError::InvalidReminder(
                "repeat interval must be positive".to_string(),
            ));
        }
        match (self.action, self.attendees.is_empty()) {
            (ReminderAction::Email, true) => {
                return Err(RfcError::InvalidReminder(
                    "EMAIL action requires at least one attendee".to_string(),
                ));
            }
            (ReminderAction::Display | ReminderAction::Audio, false) => {
                return Err(RfcError::InvalidReminder(format!(
                    "{} action does not take attendees",
                    self.action
                )));
            }
            _ => {}
        }
        self.attendees.iter().try_for_each(Participant::validate)
    }

    /// ## Summary
    /// Renders the `VALARM` block, each line CRLF-terminated.
    ///
    /// ## Errors
    /// Returns the validation error if the reminder is invalid.
    pub fn render(&self) -> RfcResult<String> {
        self.validate()?;

        let mut lines = ContentLines::new();
        lines
            .line("BEGIN:VALARM")
            .property("ACTION", self.action.as_str())
            .property("DESCRIPTION", fold_description(&self.description))
            .property("TRIGGER", format_duration(self.trigger));
        if let Some(repeat) = &self.repeat {
            lines
                .property("REPEAT", repeat.count.to_string())
                .property("DURATION", format_duration(repeat.interval));
        }
        for attendee in &self.attendees {
            lines.line(attendee.alarm_attendee_line());
        }
        lines.line("END:VALARM");
        Ok(lines.finish())
    }
}
