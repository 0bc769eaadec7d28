//! iCalendar text encoding.
//!
//! - Escape: TEXT and parameter value escaping
//! - Fold: description folding into continuation lines
//! - Format: DATE-TIME and DURATION rendering
//! - Writer: CRLF content line accumulation

mod escape;
mod fold;
mod format;
mod writer;

pub use escape::{escape_param_value, escape_text};
pub use fold::fold_description;
pub use format::{format_duration, format_instant, format_naive, format_utc_instant};
pub use writer::ContentLines;
