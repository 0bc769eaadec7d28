//! End-to-end scenarios over the public API.

mod calendar_output;
mod cancellation;
mod conflicts;
mod encoding;
