use almanac_test::fixtures::{local, utc, weekly};
use almanac_test::rfc::rfc::ical::conflict::{detect, find_conflicts};
use almanac_test::rfc::rfc::ical::core::Weekday;
use almanac_test::rfc::rfc::ical::event::Event;

fn two_week_series(title: &str, day: Weekday, start: (u8, u8), end: (u8, u8)) -> Event {
    Event::new(title, "UTC", utc(2025, 6, 2, 0, 0), utc(2025, 6, 15, 23, 59))
        .with_recurrence(weekly(day, start, end))
}

/// ## Summary
/// Two single events on the same day overlapping by half an hour.
#[test_log::test]
fn single_events_conflict_at_first_start() {
    let a = Event::new("A", "UTC", utc(2025, 6, 4, 9, 0), utc(2025, 6, 4, 10, 0));
    let b = Event::new("B", "UTC", utc(2025, 6, 4, 9, 30), utc(2025, 6, 4, 10, 30));

    assert_eq!(detect(&a, &b).unwrap(), Some(utc(2025, 6, 4, 9, 0)));
}

/// ## Summary
/// Weekly Monday series overlapping in time report the first Monday.
#[test_log::test]
fn recurring_series_conflict_on_first_monday() {
    let a = two_week_series("A", Weekday::Monday, (9, 0), (10, 0));
    let b = two_week_series("B", Weekday::Monday, (9, 30), (10, 30));

    assert_eq!(detect(&a, &b).unwrap(), Some(utc(2025, 6, 2, 9, 0)));
}

#[test_log::test]
fn recurring_series_on_other_days_do_not_conflict() {
    let a = two_week_series("A", Weekday::Monday, (9, 0), (10, 0));
    let b = two_week_series("B", Weekday::Tuesday, (9, 0), (10, 0));

    assert_eq!(detect(&a, &b).unwrap(), None);
}

/// ## Summary
/// A Monday series never conflicts with a Tuesday event.
#[test_log::test]
fn series_and_single_on_other_weekday() {
    let series = two_week_series("A", Weekday::Monday, (9, 0), (10, 0));
    let tuesday = Event::new("B", "UTC", utc(2025, 6, 3, 9, 0), utc(2025, 6, 3, 10, 0));

    assert_eq!(detect(&series, &tuesday).unwrap(), None);
    assert_eq!(detect(&tuesday, &series).unwrap(), None);
}

#[test_log::test]
fn series_and_single_in_another_zone() {
    let ny = chrono_tz::America::New_York;
    let series = Event::new(
        "Lecture",
        "America/New_York",
        local(ny, 2024, 7, 1, 0, 0),
        local(ny, 2024, 7, 31, 23, 0),
    )
    .with_recurrence(weekly(Weekday::Wednesday, (13, 0), (14, 30)));
    let meeting = Event::new(
        "Meeting",
        "America/New_York",
        local(ny, 2024, 7, 10, 14, 0),
        local(ny, 2024, 7, 10, 15, 0),
    );

    assert_eq!(
        detect(&meeting, &series).unwrap(),
        Some(local(ny, 2024, 7, 10, 13, 0))
    );
}

#[test_log::test]
fn collection_scan_skips_symmetric_duplicates() {
    let events = vec![
        two_week_series("A", Weekday::Monday, (9, 0), (10, 0)),
        two_week_series("B", Weekday::Monday, (9, 30), (10, 30)),
        Event::new("C", "UTC", utc(2025, 6, 9, 9, 45), utc(2025, 6, 9, 10, 15)),
    ];

    let pairs = find_conflicts(&events).unwrap();
    let indices: Vec<(usize, usize)> = pairs.iter().map(|p| (p.first, p.second)).collect();
    assert_eq!(indices, vec![(0, 1), (0, 2), (1, 2)]);
}
