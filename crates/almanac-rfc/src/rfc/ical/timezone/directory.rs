//! Time-zone directory: identifier to `VTIMEZONE` text.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono_tz::Tz;

use super::definitions::{UTC_TZID, builtin};

/// Read-only lookup of `VTIMEZONE` definitions.
pub trait TimeZoneDirectory {
    /// ## Summary
    /// Returns the definition for `tzid` and whether it was found.
    ///
    /// Unknown identifiers yield the UTC definition with `found == false`.
    fn lookup(&self, tzid: &str) -> (&str, bool);
}

static BUILTIN: OnceLock<HashMap<&'static str, String>> = OnceLock::new();

fn builtin_definitions() -> &'static HashMap<&'static str, String> {
    BUILTIN.get_or_init(|| {
        tracing::debug!("Rendering built-in time-zone definitions");
        builtin().collect()
    })
}

/// Built-in US and UTC definitions plus any registered by the caller.
///
/// Built-in definitions are rendered once per process on first lookup.
#[derive(Debug, Default, Clone)]
pub struct EmbeddedTimeZones {
    custom: HashMap<String, String>,
}

impl EmbeddedTimeZones {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ## Summary
    /// Registers a definition for `tzid`, taking precedence over a built-in one.
    ///
    /// Line endings are normalized to CRLF.
    pub fn register(&mut self, tzid: impl Into<String>, definition: &str) {
        let mut normalized = String::with_capacity(definition.len() + 16);
        for line in definition.lines().filter(|line| !line.is_empty()) {
            normalized.push_str(line);
            normalized.push_str("\r\n");
        }
        self.custom.insert(tzid.into(), normalized);
    }

    #[must_use]
    pub fn contains(&self, tzid: &str) -> bool {
        self.custom.contains_key(tzid) || builtin_definitions().contains_key(tzid)
    }
}

impl TimeZoneDirectory for EmbeddedTimeZones {
    fn lookup(&self, tzid: &str) -> (&str, bool) {
        if let Some(text) = self.custom.get(tzid) {
            return (text, true);
        }
        let builtin = builtin_definitions();
        if let Some(text) = builtin.get(tzid) {
            return (text, true);
        }

        tracing::warn!(tzid, "Unknown time zone, falling back to UTC definition");
        let fallback = builtin.get(UTC_TZID).map_or("", String::as_str);
        (fallback, false)
    }
}

/// ## Summary
/// Resolves a time-zone identifier to a `chrono_tz::Tz`.
///
/// Vendor prefixes such as `/mozilla.org/` are stripped. Unknown identifiers
/// resolve to UTC with `found == false`.
#[must_use]
pub fn resolve_zone(tzid: &str) -> (Tz, bool) {
    let stripped = tzid
        .strip_prefix("/mozilla.org/")
        .or_else(|| tzid.strip_prefix("/softwarestudio.org/"))
        .unwrap_or(tzid);

    match Tz::from_str(stripped) {
        Ok(tz) => (tz, true),
        Err(err) => {
            tracing::warn!(tzid, error = %err, "Unknown time zone, using UTC");
            (Tz::UTC, false)
        }
    }
}
