//! VCALENDAR aggregation.

mod aggregator;

pub use aggregator::Calendar;
