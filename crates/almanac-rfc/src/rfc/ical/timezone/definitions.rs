//! Built-in `VTIMEZONE` definitions.

use crate::rfc::ical::build::ContentLines;

/// Identifier of the fallback definition.
pub const UTC_TZID: &str = "UTC";

/// An observance: UTC offset and abbreviation.
struct Observance {
    offset: &'static str,
    name: &'static str,
}

/// A zone with a fixed standard observance and optional US-rule daylight time.
struct ZoneSpec {
    tzid: &'static str,
    standard: Observance,
    daylight: Option<Observance>,
}

const fn zone(
    tzid: &'static str,
    standard: (&'static str, &'static str),
    daylight: Option<(&'static str, &'static str)>,
) -> ZoneSpec {
    ZoneSpec {
        tzid,
        standard: Observance {
            offset: standard.0,
            name: standard.1,
        },
        daylight: match daylight {
            Some((offset, name)) => Some(Observance { offset, name }),
            None => None,
        },
    }
}

static ZONES: [ZoneSpec; 8] = [
    zone(UTC_TZID, ("+0000", "UTC"), None),
    zone("America/New_York", ("-0500", "EST"), Some(("-0400", "EDT"))),
    zone("America/Chicago", ("-0600", "CST"), Some(("-0500", "CDT"))),
    zone("America/Denver", ("-0700", "MST"), Some(("-0600", "MDT"))),
    zone("America/Phoenix", ("-0700", "MST"), None),
    zone("America/Los_Angeles", ("-0800", "PST"), Some(("-0700", "PDT"))),
    zone("America/Anchorage", ("-0900", "AKST"), Some(("-0800", "AKDT"))),
    zone("America/Honolulu", ("-1000", "HST"), None),
];

/// Renders every built-in definition as `(tzid, VTIMEZONE text)`.
pub fn builtin() -> impl Iterator<Item = (&'static str, String)> {
    ZONES.iter().map(|spec| (spec.tzid, render(spec)))
}

fn render(spec: &ZoneSpec) -> String {
    let mut lines = ContentLines::new();
    lines
        .line("BEGIN:VTIMEZONE")
        .property("TZID", spec.tzid)
        .property("X-LIC-LOCATION", spec.tzid);

    match &spec.daylight {
        None => {
            observance(
                &mut lines,
                "STANDARD",
                &spec.standard,
                spec.standard.offset,
                "19700101T000000",
                None,
            );
        }
        Some(daylight) => {
            // Second Sunday of March through the first Sunday of November.
            observance(
                &mut lines,
                "DAYLIGHT",
                daylight,
                spec.standard.offset,
                "19700308T020000",
                Some("FREQ=YEARLY;BYMONTH=3;BYDAY=2SU"),
            );
            observance(
                &mut lines,
                "STANDARD",
                &spec.standard,
                daylight.offset,
                "19701101T020000",
                Some("FREQ=YEARLY;BYMONTH=11;BYDAY=1SU"),
            );
        }
    }

    lines.line("END:VTIMEZONE");
    lines.finish()
}

fn observance(
    lines: &mut ContentLines,
    kind: &str,
    to: &Observance,
    from_offset: &str,
    dtstart: &str,
    rrule: Option<&str>,
) {
    lines
        .line(format!("BEGIN:{kind}"))
        .property("TZOFFSETFROM", from_offset)
        .property("TZOFFSETTO", to.offset)
        .property("TZNAME", to.name)
        .property("DTSTART", dtstart);
    if let Some(rrule) = rrule {
        lines.property("RRULE", rrule);
    }
    lines.line(format!("END:{kind}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_us_zones_and_utc() {
        let ids: Vec<&str> = builtin().map(|(id, _)| id).collect();
        assert_eq!(ids.len(), 8);
        assert!(ids.contains(&"UTC"));
        assert!(ids.contains(&"America/Phoenix"));
    }

    #[test]
    fn daylight_zone_has_both_observances() {
        let (_, text) = builtin()
            .find(|(id, _)| *id == "America/New_York")
            .unwrap();
        assert!(text.starts_with("BEGIN:VTIMEZONE\r\nTZID:America/New_York\r\n"));
        assert!(text.contains(
            "BEGIN:DAYLIGHT\r\nTZOFFSETFROM:-0500\r\nTZOFFSETTO:-0400\r\nTZNAME:EDT\r\n"
        ));
        assert!(text.contains(
            "BEGIN:STANDARD\r\nTZOFFSETFROM:-0400\r\nTZOFFSETTO:-0500\r\nTZNAME:EST\r\n"
        ));
        assert!(text.ends_with("END:VTIMEZONE\r\n"));
    }

    #[test]
    fn fixed_zone_has_standard_only() {
        let (_, text) = builtin().find(|(id, _)| *id == "America/Phoenix").unwrap();
        assert!(!text.contains("DAYLIGHT"));
        assert!(text.contains("TZOFFSETFROM:-0700\r\nTZOFFSETTO:-0700\r\n"));
        assert!(!text.contains("RRULE"));
    }
}
