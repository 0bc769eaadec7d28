use almanac_test::fixtures::{local, utc, weekly};
use almanac_test::rfc::rfc::ical::build::{
    escape_text, fold_description, format_duration, format_instant, format_utc_instant,
};
use almanac_test::rfc::rfc::ical::core::Weekday;
use chrono::TimeDelta;

#[test]
fn escape_text_scenario() {
    assert_eq!(escape_text("a;b\\c\nd"), "a,b\\\\c d");
}

#[test]
fn format_duration_scenarios() {
    assert_eq!(format_duration(TimeDelta::minutes(-15)), "-PT15M");
    assert_eq!(format_duration(TimeDelta::hours(25)), "P1DT1H");
    assert_eq!(format_duration(TimeDelta::zero()), "PT0S");
}

#[test]
fn format_instant_is_pure() {
    let at = local(chrono_tz::America::Los_Angeles, 2024, 12, 24, 18, 5);
    assert_eq!(format_instant(&at), "20241224T180500");
    assert_eq!(format_utc_instant(&at), "20241225T020500Z");
    assert_eq!(format_instant(&at), format_instant(&at));
}

#[test]
fn folded_description_unfolds_to_escaped_text() {
    let text = "Bring laptops; chargers\nand notes. ".repeat(6);
    let folded = fold_description(&text);
    assert!(folded.split("\r\n").all(|line| line.chars().count() <= 64));
    assert_eq!(folded.replace("\r\n ", ""), escape_text(&text));
}

#[test_log::test]
fn weekly_rrule_fragment() {
    let rule = weekly(Weekday::Monday, (9, 0), (10, 0));
    let text = rule
        .serialize(&utc(2025, 6, 2, 0, 0), &utc(2025, 6, 16, 23, 0), "UTC")
        .unwrap();
    assert!(text.contains("RRULE:FREQ=WEEKLY;BYDAY=MO;UNTIL=20250616T100000Z;\r\n"));
}
