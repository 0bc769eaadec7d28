//! Recurrence engine.
//!
//! Anchors a weekday rule to a concrete date window, expands it into
//! occurrences, serializes it as RRULE text and detects time-slot overlap
//! between two rules.

mod anchor;
mod occurrences;
mod rule;

pub use anchor::{ANCHOR_SEARCH_DAYS, anchor_end, anchor_start};
pub use occurrences::Occurrences;
pub use rule::RecurrenceRule;
