//! OpenWeatherMap payloads
//!
//! Two response shapes are supported:
//! - the 5 day / 3 hour `forecast` endpoint (`list` + `city`)
//! - the legacy `onecall` endpoint (`hourly` + `daily`, with UV index)
//!
//! Every field carries a serde default so that a partially populated payload
//! still decodes. Missing numbers become zero, which never triggers an alert.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::forecast::{DailySummary, Forecast, ForecastPeriod};

/// Which provider response shape to expect
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProviderShape {
    /// 3-hourly `forecast` endpoint
    #[default]
    ThreeHourly,
    /// Legacy hourly/daily `onecall` endpoint
    OneCall,
}

impl ProviderShape {
    /// Number of periods covering the next 24 hours
    pub fn lookahead_periods(&self) -> usize {
        match self {
            ProviderShape::ThreeHourly => 8,
            ProviderShape::OneCall => 24,
        }
    }

    /// Endpoint path relative to the provider base URL
    pub fn endpoint(&self) -> &'static str {
        match self {
            ProviderShape::ThreeHourly => "forecast",
            ProviderShape::OneCall => "onecall",
        }
    }
}

/// Errors raised while decoding a provider payload
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Invalid forecast payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OWMWeather {
    id: i32,
    description: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OWMMain {
    temp_max: f64,
    temp_min: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OWMCity {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OWMForecastItem {
    dt: i64,
    main: OWMMain,
    pop: f64,
    weather: Vec<OWMWeather>,
}

/// 3-hourly forecast response
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OWMForecastResponse {
    list: Vec<OWMForecastItem>,
    city: OWMCity,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OWMHourly {
    dt: i64,
    temp: f64,
    pop: f64,
    weather: Vec<OWMWeather>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OWMDailyTemp {
    max: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OWMDaily {
    dt: i64,
    temp: OWMDailyTemp,
    uvi: Option<f64>,
}

/// Legacy one-call response
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OWMOneCallResponse {
    hourly: Vec<OWMHourly>,
    daily: Vec<OWMDaily>,
}

/// Decode a raw provider body into a [`Forecast`]
///
/// `fallback_location` names the forecast when the payload carries no city
/// (the one-call shape never does).
pub fn decode_forecast(
    shape: ProviderShape,
    body: &[u8],
    fallback_location: &str,
) -> Result<Forecast, DecodeError> {
    let forecast = match shape {
        ProviderShape::ThreeHourly => {
            let data: OWMForecastResponse = serde_json::from_slice(body)?;
            convert_forecast_response(data, fallback_location)
        }
        ProviderShape::OneCall => {
            let data: OWMOneCallResponse = serde_json::from_slice(body)?;
            convert_one_call_response(data, fallback_location)
        }
    };
    Ok(forecast)
}

fn convert_forecast_response(data: OWMForecastResponse, fallback_location: &str) -> Forecast {
    let periods = data
        .list
        .into_iter()
        .map(|item| {
            let (condition_code, description) = first_condition(item.weather);
            ForecastPeriod {
                timestamp: timestamp(item.dt),
                temp_max_celsius: decimal(item.main.temp_max),
                temp_min_celsius: decimal(item.main.temp_min),
                pop: probability(item.pop),
                condition_code,
                description,
            }
        })
        .collect();

    let location_name = if data.city.name.is_empty() {
        fallback_location.to_string()
    } else {
        data.city.name
    };

    Forecast {
        location_name,
        periods,
        daily: Vec::new(),
    }
}

fn convert_one_call_response(data: OWMOneCallResponse, fallback_location: &str) -> Forecast {
    let periods = data
        .hourly
        .into_iter()
        .map(|hour| {
            let (condition_code, description) = first_condition(hour.weather);
            // Hourly slots carry a single temperature
            let temp = decimal(hour.temp);
            ForecastPeriod {
                timestamp: timestamp(hour.dt),
                temp_max_celsius: temp,
                temp_min_celsius: temp,
                pop: probability(hour.pop),
                condition_code,
                description,
            }
        })
        .collect();

    let daily = data
        .daily
        .into_iter()
        .map(|day| DailySummary {
            timestamp: timestamp(day.dt),
            temp_max_celsius: decimal(day.temp.max),
            uv_index: day.uvi.map(decimal),
        })
        .collect();

    Forecast {
        location_name: fallback_location.to_string(),
        periods,
        daily,
    }
}

fn first_condition(weather: Vec<OWMWeather>) -> (i32, String) {
    weather
        .into_iter()
        .next()
        .map(|w| (w.id, w.description))
        .unwrap_or_default()
}

fn timestamp(epoch_seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(epoch_seconds, 0).unwrap_or_default()
}

fn decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Probability clamped to 0-1; out-of-range provider values are clipped
fn probability(value: f64) -> Decimal {
    decimal(value).clamp(Decimal::ZERO, Decimal::ONE)
}
