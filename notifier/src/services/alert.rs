//! Weather alert service
//!
//! One run is: fetch forecast -> evaluate -> compose -> broadcast. Every
//! failure is logged where it happens and reported as a [`RunOutcome`]; a run
//! never returns an error and nothing is retried.

use chrono::{DateTime, Utc};
use shared::{
    compose_notification, evaluate, format_local_time, EvaluationRules, GpsCoordinates, Language,
};

use crate::config::Config;
use crate::error::AppResult;
use crate::external::{LineMessage, LineMessagingClient, WeatherClient};

/// How a single run ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Message broadcast to all subscribers
    Sent,
    /// Forecast evaluated and nothing noteworthy found
    NothingToSend,
    /// Message composed but not broadcast (dry run or no channel token)
    PushSkipped { message: String },
    /// Forecast could not be fetched or decoded
    FetchFailed { reason: String },
    /// Broadcast was rejected or could not be delivered
    PushFailed { reason: String },
}

/// Weather alert service
pub struct AlertService {
    weather_client: WeatherClient,
    line_client: Option<LineMessagingClient>,
    coordinates: GpsCoordinates,
    location_name: String,
    rules: EvaluationRules,
    language: Language,
}

impl AlertService {
    /// Create a new AlertService instance
    pub fn new(
        weather_client: WeatherClient,
        line_client: Option<LineMessagingClient>,
        coordinates: GpsCoordinates,
        location_name: String,
        rules: EvaluationRules,
        language: Language,
    ) -> Self {
        Self {
            weather_client,
            line_client,
            coordinates,
            location_name,
            rules,
            language,
        }
    }

    /// Build the service and its clients from configuration
    ///
    /// No LINE client is created in dry-run mode or when the channel token
    /// is missing.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let weather_client = WeatherClient::new(
            config.weather.api_key.clone(),
            config.weather.api_endpoint.clone(),
            config.weather.shape,
            config.weather.language,
        )
        .with_timeout(std::time::Duration::from_secs(config.weather.timeout_secs))?;

        let line_client = if config.can_broadcast() {
            Some(
                LineMessagingClient::new(
                    config.line.channel_access_token.clone(),
                    config.line.api_endpoint.clone(),
                )
                .with_timeout(std::time::Duration::from_secs(config.line.timeout_secs))?,
            )
        } else {
            None
        };

        Ok(Self::new(
            weather_client,
            line_client,
            config.coordinates(),
            config.location.name.clone(),
            config.evaluation_rules(),
            config.weather.language,
        ))
    }

    /// Run the pipeline once
    pub async fn run(&self, now: DateTime<Utc>) -> RunOutcome {
        let forecast = match self
            .weather_client
            .fetch_forecast(self.coordinates, &self.location_name)
            .await
        {
            Ok(forecast) => forecast,
            Err(e) => {
                let detail = e.detail();
                tracing::error!(code = detail.code, "{} / {}", detail.message_en, detail.message_th);
                return RunOutcome::FetchFailed {
                    reason: e.to_string(),
                };
            }
        };

        let findings = evaluate(&forecast, &self.rules, now);
        tracing::debug!(findings = findings.len(), "Forecast evaluated");

        let retrieved_at = format_local_time(now, self.rules.display_offset, self.language);
        let Some(message) =
            compose_notification(&findings, &self.location_name, &retrieved_at, self.language)
        else {
            tracing::info!("Weather looks fine, nothing to send");
            return RunOutcome::NothingToSend;
        };

        let Some(line_client) = &self.line_client else {
            tracing::warn!("LINE broadcast skipped (dry run or missing channel access token)");
            tracing::info!("Composed message:\n{}", message);
            return RunOutcome::PushSkipped { message };
        };

        match line_client
            .broadcast(LineMessage::Text { text: message })
            .await
        {
            Ok(()) => {
                tracing::info!("Broadcast sent to LINE Official Account");
                RunOutcome::Sent
            }
            Err(e) => {
                let detail = e.detail();
                tracing::error!(code = detail.code, "{} / {}", detail.message_en, detail.message_th);
                RunOutcome::PushFailed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
