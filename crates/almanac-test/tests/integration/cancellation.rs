use almanac_test::fixtures::{utc, weekly};
use almanac_test::rfc::error::RfcError;
use almanac_test::rfc::rfc::ical::core::Weekday;
use almanac_test::rfc::rfc::ical::event::Event;
use chrono::NaiveDate;

fn weekly_standup() -> Event {
    Event::new("Standup", "UTC", utc(2025, 6, 2, 0, 0), utc(2025, 6, 30, 23, 0))
        .with_recurrence(weekly(Weekday::Monday, (9, 0), (9, 15)))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// ## Summary
/// Cancelling a weekday without a rule fails and changes nothing.
#[test_log::test]
fn cancel_on_unscheduled_weekday() {
    let mut event = weekly_standup();
    let thursday = date(2025, 6, 12);

    assert_eq!(
        event.cancel_on_date(thursday),
        Err(RfcError::NoRecurrenceFoundForException(thursday))
    );
    assert!(event.recurrences[0].exceptions.is_empty());
}

/// ## Summary
/// A cancelled Monday disappears from the expanded occurrences.
#[test_log::test]
fn cancel_removes_occurrence() {
    let mut event = weekly_standup();
    event.cancel_on_date(date(2025, 6, 16)).unwrap();

    let dates: Vec<NaiveDate> = event.recurrences[0]
        .occurrences(&event.start, &event.end)
        .unwrap()
        .map(|occ| occ.date_naive())
        .collect();
    assert_eq!(
        dates,
        vec![date(2025, 6, 2), date(2025, 6, 9), date(2025, 6, 23), date(2025, 6, 30)]
    );
}

#[test_log::test]
fn cancellation_renders_exdate() {
    let mut event = weekly_standup();
    event.cancel_on_date(date(2025, 6, 16)).unwrap();

    let text = almanac_test::fixtures::fixed_assembler()
        .assemble(&event)
        .unwrap();
    assert!(text.contains("EXDATE;TZID=UTC:20250616T090000\r\n"));
}
