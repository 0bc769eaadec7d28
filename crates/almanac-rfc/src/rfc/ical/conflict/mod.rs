//! Scheduling conflict detection between events.

mod detector;

pub use detector::{ConflictPair, detect, find_conflicts};
