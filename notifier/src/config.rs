//! Configuration management for the weather alert notifier
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with WEATHER_ALERT_ prefix and `__`
//!    between nested keys (e.g. `WEATHER_ALERT_LINE__DRY_RUN=true`)
//! 4. The bare `OWM_API_KEY` and `LINE_TOKEN` variables used by the
//!    scheduled workflow secrets

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{utc_offset_hours, EvaluationRules, GpsCoordinates, Language, ProviderShape};

use crate::error::{AppError, AppResult};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// The single location being watched
    pub location: LocationConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// LINE Messaging API configuration
    pub line: LineConfig,

    /// Alert thresholds and rule variant
    pub rules: RulesConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LocationConfig {
    /// Name shown in the message header
    pub name: String,

    pub latitude: Decimal,

    pub longitude: Decimal,

    /// Offset used for displayed times
    pub utc_offset_hours: i32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key
    pub api_key: String,

    /// Response shape served by the endpoint
    pub shape: ProviderShape,

    /// Language for provider descriptions and our own messages
    pub language: Language,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LineConfig {
    /// LINE Messaging API base URL
    pub api_endpoint: String,

    /// LINE Messaging API channel access token
    pub channel_access_token: String,

    /// Compose and log the message without broadcasting it
    pub dry_run: bool,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RulesConfig {
    pub heat_threshold_celsius: Decimal,

    pub uv_index_threshold: Decimal,

    /// Provider supplies a daily UV index (legacy one-call payload)
    pub has_uv_signal: bool,

    /// Only check heat on runs before `morning_cutoff_hour_utc`
    pub morning_only_heat_check: bool,

    pub morning_cutoff_hour_utc: u32,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> AppResult<Self> {
        let environment =
            std::env::var("WEATHER_ALERT_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = Self::builder(&environment)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (WEATHER_ALERT_ prefix)
            .add_source(Self::environment_overrides())
            // Secrets as named by the scheduled workflow
            .set_override_option("weather.api_key", std::env::var("OWM_API_KEY").ok())?
            .set_override_option("line.channel_access_token", std::env::var("LINE_TOKEN").ok())?
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Environment source mapping `WEATHER_ALERT_SECTION__KEY` to `section.key`
    pub fn environment_overrides() -> Environment {
        Environment::with_prefix("WEATHER_ALERT")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// Builder pre-populated with default values
    pub fn builder(environment: &str) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("environment", environment)?
            // Inburi, Sing Buri
            .set_default("location.name", "อินทร์บุรี")?
            .set_default("location.latitude", "15.0207")?
            .set_default("location.longitude", "100.3425")?
            .set_default("location.utc_offset_hours", 7)?
            .set_default("weather.api_endpoint", "https://api.openweathermap.org/data/2.5")?
            .set_default("weather.api_key", "")?
            .set_default("weather.shape", "three_hourly")?
            .set_default("weather.language", "thai")?
            .set_default("weather.timeout_secs", 10)?
            .set_default("line.api_endpoint", "https://api.line.me")?
            .set_default("line.channel_access_token", "")?
            .set_default("line.dry_run", false)?
            .set_default("line.timeout_secs", 10)?
            .set_default("rules.heat_threshold_celsius", "38.0")?
            .set_default("rules.uv_index_threshold", "9")?
            .set_default("rules.has_uv_signal", false)?
            .set_default("rules.morning_only_heat_check", false)?
            .set_default("rules.morning_cutoff_hour_utc", 8)
    }

    /// Reject settings that would make every run fail or misbehave
    pub fn validate(&self) -> AppResult<()> {
        if self.weather.api_key.trim().is_empty() {
            return Err(AppError::Configuration(
                "weather.api_key is required (set OWM_API_KEY)".to_string(),
            ));
        }
        if self.location.latitude.abs() > Decimal::from(90) {
            return Err(AppError::Configuration(
                "location.latitude must be between -90 and 90".to_string(),
            ));
        }
        if self.location.longitude.abs() > Decimal::from(180) {
            return Err(AppError::Configuration(
                "location.longitude must be between -180 and 180".to_string(),
            ));
        }
        if !(-12..=14).contains(&self.location.utc_offset_hours) {
            return Err(AppError::Configuration(
                "location.utc_offset_hours must be between -12 and 14".to_string(),
            ));
        }
        if self.rules.morning_cutoff_hour_utc > 24 {
            return Err(AppError::Configuration(
                "rules.morning_cutoff_hour_utc must be between 0 and 24".to_string(),
            ));
        }
        Ok(())
    }

    pub fn coordinates(&self) -> GpsCoordinates {
        GpsCoordinates::new(self.location.latitude, self.location.longitude)
    }

    /// Evaluator rules derived from the provider shape and rule settings
    pub fn evaluation_rules(&self) -> EvaluationRules {
        EvaluationRules {
            heat_threshold_celsius: self.rules.heat_threshold_celsius,
            uv_index_threshold: self.rules.uv_index_threshold,
            has_uv_signal: self.rules.has_uv_signal,
            morning_only_heat_check: self.rules.morning_only_heat_check,
            morning_cutoff_hour_utc: self.rules.morning_cutoff_hour_utc,
            display_offset: utc_offset_hours(self.location.utc_offset_hours),
            ..EvaluationRules::for_shape(self.weather.shape)
        }
    }

    /// Whether a LINE broadcast can be attempted
    pub fn can_broadcast(&self) -> bool {
        !self.line.dry_run && !self.line.channel_access_token.trim().is_empty()
    }
}
