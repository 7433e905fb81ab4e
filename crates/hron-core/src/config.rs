use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{CONFIG_FILE_STEM, ENV_PREFIX};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Number of occurrences printed when the caller does not ask for a count.
    pub count: usize,
    /// IANA zone used to print instants. Schedules still evaluate in their own zone.
    pub timezone: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and an optional `hron.toml`
    /// into a `Settings`. Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Config::builder()
            .set_default("logging.level", "warn")?
            .set_default("output.count", 5)?
            .set_default("output.timezone", "UTC")?
            .add_source(config::File::with_name(CONFIG_FILE_STEM).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Checks values that deserialize cleanly but cannot be used.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` for a zero occurrence count or an empty
    /// log level or output timezone.
    pub fn validate(&self) -> CoreResult<()> {
        if self.output.count == 0 {
            return Err(CoreError::ConfigError(
                "output.count must be at least 1".to_string(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(CoreError::ConfigError(
                "logging.level must not be empty".to_string(),
            ));
        }
        if self.output.timezone.trim().is_empty() {
            return Err(CoreError::ConfigError(
                "output.timezone must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading, deserializing, or validating the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    settings.validate()?;
    tracing::debug!(
        level = %settings.logging.level,
        count = settings.output.count,
        timezone = %settings.output.timezone,
        "Configuration loaded"
    );
    Ok(settings)
}
