//! Events and the participants and reminders attached to them.

mod calendar_event;
mod participant;
mod reminder;

pub use calendar_event::Event;
pub use participant::{Participant, is_valid_email};
pub use reminder::{Reminder, ReminderAction, Repeat};
