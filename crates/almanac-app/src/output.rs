//! Calendar assembly from settings and persistence of the rendered text.

use almanac_core::config::CalendarConfig;
use almanac_rfc::rfc::ical::calendar::Calendar;
use almanac_rfc::rfc::ical::event::Event;

use crate::error::{AppError, AppResult};

/// ## Summary
/// Builds a calendar named and identified by `config` holding `events`.
///
/// ## Errors
/// Returns `RfcError::InvalidEvent` for the first invalid event.
pub fn build_calendar(config: &CalendarConfig, events: Vec<Event>) -> AppResult<Calendar> {
    let mut calendar =
        Calendar::new(&config.name, &config.description).with_prodid(&config.prodid);
    for event in events {
        calendar.add_event(event)?;
    }
    Ok(calendar)
}

/// ## Summary
/// Writes rendered calendar text to `path`, replacing any existing file.
///
/// ## Errors
/// Returns `AppError::IoError` if the file cannot be written.
pub fn save(path: &str, contents: &str) -> AppResult<()> {
    std::fs::write(path, contents).map_err(|source| AppError::IoError {
        path: path.to_string(),
        source,
    })?;
    tracing::debug!(path, bytes = contents.len(), "Saved calendar");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn config() -> CalendarConfig {
        CalendarConfig {
            name: "Classes".to_string(),
            description: String::new(),
            prodid: "-//test//EN".to_string(),
        }
    }

    #[test]
    fn build_calendar_applies_settings() {
        let utc = chrono_tz::UTC;
        let event = Event::new(
            "Lab",
            "UTC",
            utc.with_ymd_and_hms(2025, 2, 3, 9, 0, 0).unwrap(),
            utc.with_ymd_and_hms(2025, 2, 3, 10, 0, 0).unwrap(),
        );
        let calendar = build_calendar(&config(), vec![event]).unwrap();
        assert_eq!(calendar.name, "Classes");
        assert_eq!(calendar.prodid, "-//test//EN");
        assert_eq!(calendar.events().len(), 1);
    }

    #[test]
    fn save_writes_file() {
        let path = std::env::temp_dir().join(format!("almanac-save-{}.ics", std::process::id()));
        let path = path.to_string_lossy().into_owned();
        save(&path, "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n"
        );
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn save_reports_unwritable_path() {
        let err = save("/nonexistent/dir/out.ics", "x").unwrap_err();
        assert!(matches!(err, AppError::IoError { .. }));
    }
}
