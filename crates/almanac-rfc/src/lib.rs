//! RFC 5545 calendar generation with recurrence and conflict detection.

pub mod error;
pub mod rfc;
