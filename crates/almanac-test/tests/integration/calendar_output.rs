use almanac_test::app::input::parse_events;
use almanac_test::app::output::build_calendar;
use almanac_test::common::config::CalendarConfig;
use almanac_test::fixtures::fixed_assembler;
use almanac_test::rfc::rfc::ical::timezone::EmbeddedTimeZones;

const EVENTS: &str = r#"{
    "events": [
        {
            "title": "Data Structures",
            "description": "Lecture; bring notes",
            "location": "Hall B",
            "timezone": "America/New_York",
            "start": "2024-07-01T00:00:00",
            "end": "2024-07-15T23:00:00",
            "recurrences": [
                { "frequency": "WEEKLY", "day": "MO", "start_time": "10:00", "end_time": "11:00" }
            ],
            "organizer": { "name": "Dr. Smith", "email": "smith@example.edu" },
            "attendees": [ { "name": "Jane", "email": "jane@example.edu" } ],
            "reminders": [
                { "action": "DISPLAY", "description": "Lecture soon", "trigger_minutes": -15 }
            ]
        },
        {
            "title": "Advising",
            "timezone": "America/New_York",
            "start": "2024-07-08T10:30:00",
            "end": "2024-07-08T11:00:00"
        }
    ]
}"#;

fn config() -> CalendarConfig {
    CalendarConfig {
        name: "Summer term".to_string(),
        description: String::new(),
        prodid: "-//almanac//Calendar//EN".to_string(),
    }
}

/// ## Summary
/// A JSON document becomes a complete calendar with the expected fragments.
#[test_log::test]
fn json_to_calendar_text() {
    let events = parse_events(EVENTS).unwrap();
    let calendar = build_calendar(&config(), events).unwrap();
    let text = calendar
        .render(&fixed_assembler(), &EmbeddedTimeZones::new())
        .unwrap();

    assert!(text.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n"));
    assert!(text.ends_with("END:VCALENDAR\r\n"));
    assert_eq!(text.matches("BEGIN:VTIMEZONE\r\n").count(), 1);
    assert!(text.contains("TZID:America/New_York\r\n"));

    assert!(text.contains("DTSTART;TZID=America/New_York:20240701T100000\r\n"));
    assert!(text.contains("RRULE:FREQ=WEEKLY;BYDAY=MO;UNTIL=20240715T150000Z;\r\n"));
    assert!(text.contains("UID:Data_Structures-WEEKLY-MO-10_00-11_00@almanac\r\n"));
    assert!(text.contains("UID:Advising-Monday-Monday@almanac\r\n"));
    assert!(text.contains("DESCRIPTION:Lecture, bring notes\r\n"));
    assert!(text.contains("TRIGGER:-PT15M\r\n"));
    assert!(text.contains("ORGANIZER;CN=Dr. Smith:mailto:smith@example.edu\r\n"));
    assert_eq!(text.matches("DTSTAMP:20250101T083000Z\r\n").count(), 2);
    assert!(text.split("\r\n").all(|line| !line.contains('\n')));
}

#[test_log::test]
fn json_calendar_reports_conflict() {
    let events = parse_events(EVENTS).unwrap();
    let calendar = build_calendar(&config(), events).unwrap();

    let pairs = calendar.conflicts().unwrap();
    assert_eq!(pairs.len(), 1);
    assert_eq!(calendar.events()[pairs[0].first].title, "Data Structures");
    assert_eq!(calendar.events()[pairs[0].second].title, "Advising");
    assert_eq!(
        pairs[0].at.naive_local().to_string(),
        "2024-07-08 10:00:00"
    );
}
