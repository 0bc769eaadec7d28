use almanac_app::input::load_events;
use almanac_app::output::{build_calendar, save};
use almanac_core::config::load_config;
use almanac_rfc::rfc::ical::assemble::EventAssembler;
use almanac_rfc::rfc::ical::timezone::{EmbeddedTimeZones, SystemClock};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let events = load_events(&config.input.events_path)?;
    let calendar = build_calendar(&config.calendar, events)?;

    let conflicts = calendar.conflicts()?;
    for pair in &conflicts {
        let events = calendar.events();
        tracing::warn!(
            first = %events[pair.first].title,
            second = %events[pair.second].title,
            at = %pair.at,
            "Scheduling conflict"
        );
    }

    let text = calendar.render(&EventAssembler::new(SystemClock), &EmbeddedTimeZones::new())?;
    let path = config.output.ics_path();
    save(&path, &text)?;

    tracing::info!(
        path = %path,
        events = calendar.events().len(),
        conflicts = conflicts.len(),
        "Calendar written"
    );

    Ok(())
}
