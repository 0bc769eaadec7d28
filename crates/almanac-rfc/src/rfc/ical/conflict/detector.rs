//! Pairwise overlap detection for single and recurring events.
//!
//! Exactly one of three cases applies to a pair, decided by whether each
//! side recurs:
//! - single vs single: half-open interval overlap, reported at the left start
//! - recurring vs recurring: rules overlapping by weekday and time slot are
//!   expanded over their events' windows and the first shared calendar date
//!   (left occurrences ascending, then right) is reported with the left
//!   rule's start time
//! - recurring vs single: rules on the single event's weekday are placed on
//!   its date and tested for overlap
//!
//! Only one representative instant is reported per pair.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, NaiveDate};
use chrono_tz::Tz;

use crate::error::RfcResult;
use crate::rfc::ical::core::{Weekday, at_local};
use crate::rfc::ical::event::Event;

/// Two events of a collection that conflict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictPair {
    /// Index of the earlier event in the collection.
    pub first: usize,
    /// Index of the later event in the collection.
    pub second: usize,
    /// Representative conflict instant.
    pub at: DateTime<Tz>,
}

/// How two events are compared.
enum Pairing<'a> {
    Single(&'a Event, &'a Event),
    Recurring(&'a Event, &'a Event),
    Mixed { recurring: &'a Event, single: &'a Event },
}

impl<'a> Pairing<'a> {
    fn classify(a: &'a Event, b: &'a Event) -> Self {
        match (a.is_recurring(), b.is_recurring()) {
            (false, false) => Self::Single(a, b),
            (true, true) => Self::Recurring(a, b),
            (true, false) => Self::Mixed {
                recurring: a,
                single: b,
            },
            (false, true) => Self::Mixed {
                recurring: b,
                single: a,
            },
        }
    }

    fn first_conflict(&self) -> RfcResult<Option<DateTime<Tz>>> {
        match *self {
            Self::Single(a, b) => Ok((a.start < b.end && b.start < a.end).then_some(a.start)),
            Self::Recurring(a, b) => recurring_conflict(a, b),
            Self::Mixed { recurring, single } => mixed_conflict(recurring, single),
        }
    }
}

/// ## Summary
/// Decides whether two events overlap and returns a representative instant.
///
/// ## Errors
/// Returns `RfcError::InvalidEvent` if either event is invalid, or an error
/// from occurrence expansion.
#[tracing::instrument(skip_all, fields(left = %a.title, right = %b.title))]
pub fn detect(a: &Event, b: &Event) -> RfcResult<Option<DateTime<Tz>>> {
    a.validate()?;
    b.validate()?;

    let conflict = Pairing::classify(a, b).first_conflict()?;
    if let Some(at) = &conflict {
        tracing::debug!(%at, "Events conflict");
    }
    Ok(conflict)
}

/// ## Summary
/// Compares every unordered pair of `events` once.
///
/// Pairs are reported in index order with `first < second`.
///
/// ## Errors
/// Returns the first error raised by `detect`.
#[tracing::instrument(skip(events), fields(count = events.len()))]
pub fn find_conflicts(events: &[Event]) -> RfcResult<Vec<ConflictPair>> {
    let mut pairs = Vec::new();
    for (first, a) in events.iter().enumerate() {
        for (offset, b) in events[first + 1..].iter().enumerate() {
            if let Some(at) = detect(a, b)? {
                pairs.push(ConflictPair {
                    first,
                    second: first + 1 + offset,
                    at,
                });
            }
        }
    }
    tracing::debug!(conflicts = pairs.len(), "Finished conflict scan");
    Ok(pairs)
}

fn recurring_conflict(a: &Event, b: &Event) -> RfcResult<Option<DateTime<Tz>>> {
    for left in &a.recurrences {
        for right in &b.recurrences {
            let Some(time) = left.conflicts_with(right) else {
                continue;
            };

            let right_dates: BTreeSet<NaiveDate> = right
                .occurrences(&b.start, &b.end)?
                .map(|occ| occ.date_naive())
                .collect();

            let shared = left
                .occurrences(&a.start, &a.end)?
                .find(|occ| right_dates.contains(&occ.date_naive()));

            if let Some(occ) = shared {
                return at_local(occ.timezone(), occ.date_naive(), time).map(Some);
            }
            tracing::trace!(day = %left.day, "Rules overlap but share no date");
        }
    }
    Ok(None)
}

fn mixed_conflict(recurring: &Event, single: &Event) -> RfcResult<Option<DateTime<Tz>>> {
    let day = Weekday::from(single.start.weekday());
    let tz = single.start.timezone();
    let date = single.start.date_naive();

    for rule in recurring.recurrences.iter().filter(|rule| rule.day == day) {
        let slot_start = at_local(tz, date, rule.start_time)?;
        let slot_end = at_local(tz, date, rule.end_time)?;
        if single.start < slot_end && slot_start < single.end {
            return Ok(Some(slot_start));
        }
    }
    Ok(None)
}
