//! Shared settings, errors and constants for the almanac crates.

pub mod config;
pub mod constants;
pub mod error;
