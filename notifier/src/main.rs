//! Inburi Weather Alert - scheduled notifier
//!
//! Fetches the forecast for Inburi, Sing Buri, checks it for extreme heat and
//! significant rain, and broadcasts a LINE message to every friend of the
//! Official Account when something is worth knowing. Meant to be run by a
//! scheduler (cron, GitHub Actions) once per slot; each run is independent.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod services;

use services::{AlertService, RunOutcome};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json");
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_alert=debug".into()),
        )
        .with((!json_logs).then(tracing_subscriber::fmt::layer))
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .init();

    // Load configuration
    let config = config::Config::load()?;

    tracing::info!("===== Starting weather check =====");
    tracing::info!(
        environment = %config.environment,
        location = %config.location.name,
        shape = ?config.weather.shape,
        "Configuration loaded"
    );

    let service = AlertService::from_config(&config)?;
    let outcome = service.run(chrono::Utc::now()).await;

    match &outcome {
        RunOutcome::Sent => tracing::info!("Alert broadcast"),
        RunOutcome::NothingToSend => tracing::info!("No alert needed"),
        RunOutcome::PushSkipped { .. } => tracing::info!("Alert composed, broadcast skipped"),
        RunOutcome::FetchFailed { reason } => {
            tracing::warn!(%reason, "Run ended without a forecast")
        }
        RunOutcome::PushFailed { reason } => {
            tracing::warn!(%reason, "Run ended without delivering the alert")
        }
    }

    tracing::info!("===== Weather check finished =====");
    Ok(())
}
