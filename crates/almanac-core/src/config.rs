use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{DEFAULT_PRODID, ICS_EXTENSION, PRODUCT_NAME};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub calendar: CalendarConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    pub name: String,
    pub description: String,
    pub prodid: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    pub events_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub path: String,
}

impl OutputConfig {
    /// ## Summary
    /// Returns the output path with the `.ics` extension appended when missing.
    #[must_use]
    pub fn ics_path(&self) -> String {
        let suffix = const_str::concat!(".", ICS_EXTENSION);
        if self.path.ends_with(suffix) {
            self.path.clone()
        } else {
            format!("{}{suffix}", self.path)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, `ALMANAC_*` environment variables and
    /// an optional `config.toml` into a `Settings`.
    ///
    /// Nested keys use a double underscore, e.g. `ALMANAC_CALENDAR__NAME`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Config::builder()
            .set_default("calendar.name", PRODUCT_NAME)?
            .set_default("calendar.description", "")?
            .set_default("calendar.prodid", DEFAULT_PRODID)?
            .set_default("input.events_path", "events.json")?
            .set_default("output.path", const_str::concat!("calendar.", ICS_EXTENSION))?
            .set_default("logging.level", "info")?
            .add_source(
                config::Environment::with_prefix("ALMANAC")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Checks that the values needed to produce a calendar are present.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` naming the first empty setting.
    pub fn validate(&self) -> CoreResult<()> {
        let required = [
            ("calendar.name", &self.calendar.name),
            ("calendar.prodid", &self.calendar.prodid),
            ("input.events_path", &self.input.events_path),
            ("output.path", &self.output.path),
        ];
        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((key, _)) => Err(CoreError::ConfigError(format!("{key} must not be empty"))),
            None => Ok(()),
        }
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    settings.validate()?;
    tracing::debug!(prodid = %settings.calendar.prodid, "Settings loaded");
    Ok(settings)
}
