//! Attendees and organizers (RFC 5545 §3.8.4.1, §3.8.4.3).

use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::build::escape_param_value;

/// A person taking part in an event or receiving a reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// Display name, rendered as `CN` when non-empty.
    pub name: String,
    pub email: String,
}

impl Participant {
    /// ## Summary
    /// Creates a participant after checking the email address.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidEmail` if the address is malformed.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> RfcResult<Self> {
        let participant = Self {
            name: name.into(),
            email: email.into(),
        };
        participant.validate()?;
        Ok(participant)
    }

    /// ## Summary
    /// Checks the participant's email address.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidEmail` if the address is malformed.
    pub fn validate(&self) -> RfcResult<()> {
        if is_valid_email(&self.email) {
            Ok(())
        } else {
            Err(RfcError::InvalidEmail(self.email.clone()))
        }
    }

    /// Renders the `ATTENDEE` content line, without line break.
    #[must_use]
    pub fn attendee_line(&self) -> String {
        format!(
            "ATTENDEE;CUTYPE=INDIVIDUAL;ROLE=REQ-PARTICIPANT;PARTSTAT=NEEDS-ACTION;RSVP=TRUE{};X-NUM-GUESTS=0:mailto:{}",
            self.cn_param(),
            self.email
        )
    }

    /// Renders the `ORGANIZER` content line, without line break.
    #[must_use]
    pub fn organizer_line(&self) -> String {
        format!("ORGANIZER{}:mailto:{}", self.cn_param(), self.email)
    }

    /// Renders the `ATTENDEE` line of an email reminder, without line break.
    #[must_use]
    pub fn alarm_attendee_line(&self) -> String {
        format!("ATTENDEE{}:mailto:{}", self.cn_param(), self.email)
    }

    fn cn_param(&self) -> String {
        if self.name.is_empty() {
            String::new()
        } else {
            format!(";CN={}", escape_param_value(&self.name))
        }
    }
}

/// An address is valid when it contains `@` and neither starts nor ends with it.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    email.contains('@') && !email.starts_with('@') && !email.ends_with('@')
}
