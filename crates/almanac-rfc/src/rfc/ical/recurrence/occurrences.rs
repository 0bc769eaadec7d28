//! Occurrence stepping for a recurrence rule over a bounded window.

use chrono::{DateTime, Days, Months, NaiveDate};
use chrono_tz::Tz;

use super::anchor::{anchor_start, first_on_or_after};
use super::rule::RecurrenceRule;
use crate::error::RfcResult;
use crate::rfc::ical::core::{Frequency, at_local};

/// ## Summary
/// Ascending, finite sequence of occurrence instants of one rule.
///
/// The sequence starts at the rule's anchored start and advances by the
/// rule's cadence. Each stepped date is re-anchored forward to the rule's
/// weekday, so every occurrence falls on that weekday and at most one is
/// produced per calendar date. Iteration ends once an occurrence would lie
/// after the window end; exception dates are skipped.
///
/// Cloning yields an independent cursor, so the sequence can be restarted.
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    rule: &'a RecurrenceRule,
    tz: Tz,
    first: NaiveDate,
    window_end: DateTime<Tz>,
    step: u32,
    last_date: Option<NaiveDate>,
    done: bool,
}

impl<'a> Occurrences<'a> {
    /// ## Summary
    /// Creates the occurrence sequence of `rule` over `[window_start, window_end]`.
    ///
    /// ## Errors
    /// Returns an error if the rule's weekday cannot be anchored to the window start.
    pub fn new(
        rule: &'a RecurrenceRule,
        window_start: &DateTime<Tz>,
        window_end: &DateTime<Tz>,
    ) -> RfcResult<Self> {
        let anchored = anchor_start(window_start, rule.day, rule.start_time)?;
        Ok(Self {
            rule,
            tz: anchored.timezone(),
            first: anchored.date_naive(),
            window_end: *window_end,
            step: 0,
            last_date: None,
            done: false,
        })
    }

    /// Date reached after `step` cadence increments from the first occurrence.
    fn stepped_date(&self, step: u32) -> Option<NaiveDate> {
        match self.rule.frequency {
            Frequency::Daily => self.first.checked_add_days(Days::new(u64::from(step))),
            Frequency::Weekly => self
                .first
                .checked_add_days(Days::new(u64::from(step) * 7)),
            Frequency::Monthly => self.first.checked_add_months(Months::new(step)),
            Frequency::Yearly => self
                .first
                .checked_add_months(Months::new(step.checked_mul(12)?)),
        }
    }
}

impl Iterator for Occurrences<'_> {
    type Item = DateTime<Tz>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let Some(date) = self
                .stepped_date(self.step)
                .and_then(|stepped| first_on_or_after(stepped, self.rule.day))
            else {
                self.done = true;
                break;
            };
            self.step = self.step.saturating_add(1);

            if self.last_date.is_some_and(|last| date <= last) {
                continue;
            }

            let instant = match at_local(self.tz, date, self.rule.start_time) {
                Ok(instant) => instant,
                Err(err) => {
                    tracing::warn!(%date, error = %err, "Skipping occurrence with unmappable local time");
                    self.last_date = Some(date);
                    continue;
                }
            };

            if instant > self.window_end {
                self.done = true;
                break;
            }
            self.last_date = Some(date);

            if self.rule.is_exception(date) {
                tracing::trace!(%date, "Skipping exception date");
                continue;
            }

            tracing::trace!(%instant, "Occurrence");
            return Some(instant);
        }
        None
    }
}

impl std::iter::FusedIterator for Occurrences<'_> {}
