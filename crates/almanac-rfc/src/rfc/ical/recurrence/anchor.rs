//! Weekday anchoring within a bounded search window.

use chrono::{DateTime, Datelike, Days, NaiveDate};
use chrono_tz::Tz;

use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::core::{TimeOfDay, Weekday, at_local};

/// Number of days the anchor search may move away from the window edge.
pub const ANCHOR_SEARCH_DAYS: u64 = 7;

/// ## Summary
/// Finds the first date on or after `window_start` that falls on `weekday`
/// and combines it with `time` in the window's zone.
///
/// The search covers at most `ANCHOR_SEARCH_DAYS` days. Only the calendar
/// date of `window_start` is considered, so the result may precede
/// `window_start` on the same day.
///
/// ## Errors
/// Returns `RfcError::AnchorNotFound` if the search is exhausted, or
/// `RfcError::NonExistentLocalTime` if the wall-clock time cannot be mapped.
pub fn anchor_start(
    window_start: &DateTime<Tz>,
    weekday: Weekday,
    time: TimeOfDay,
) -> RfcResult<DateTime<Tz>> {
    let date = first_on_or_after(window_start.date_naive(), weekday).ok_or(
        RfcError::AnchorNotFound {
            weekday: weekday.name(),
        },
    )?;
    at_local(window_start.timezone(), date, time)
}

/// ## Summary
/// Finds the last instant at or before `window_end` that falls on `weekday`
/// with wall-clock time `time`.
///
/// The search walks back at most `ANCHOR_SEARCH_DAYS` days from the date of
/// `window_end`. A matching date whose combined instant lies after
/// `window_end` is skipped.
///
/// ## Errors
/// Returns `RfcError::AnchorNotFound` if the search is exhausted, or
/// `RfcError::NonExistentLocalTime` if the wall-clock time cannot be mapped.
pub fn anchor_end(
    window_end: &DateTime<Tz>,
    weekday: Weekday,
    time: TimeOfDay,
) -> RfcResult<DateTime<Tz>> {
    let target = chrono::Weekday::from(weekday);
    let base = window_end.date_naive();

    for offset in 0..=ANCHOR_SEARCH_DAYS {
        let Some(date) = base.checked_sub_days(Days::new(offset)) else {
            break;
        };
        if date.weekday() != target {
            continue;
        }
        let candidate = at_local(window_end.timezone(), date, time)?;
        if candidate <= *window_end {
            return Ok(candidate);
        }
    }

    Err(RfcError::AnchorNotFound {
        weekday: weekday.name(),
    })
}

/// Returns the first date on or after `date` that falls on `weekday`,
/// looking at most `ANCHOR_SEARCH_DAYS` days ahead.
pub(crate) fn first_on_or_after(date: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let target = chrono::Weekday::from(weekday);
    (0..ANCHOR_SEARCH_DAYS)
        .filter_map(|offset| date.checked_add_days(Days::new(offset)))
        .find(|candidate| candidate.weekday() == target)
}
