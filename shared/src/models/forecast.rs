//! Forecast models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One forecast time slot, taken verbatim from the provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastPeriod {
    pub timestamp: DateTime<Utc>,
    pub temp_max_celsius: Decimal,
    pub temp_min_celsius: Decimal,
    /// Probability of precipitation (0-1)
    pub pop: Decimal,
    pub condition_code: i32,
    pub description: String,
}

impl ForecastPeriod {
    /// Probability of precipitation as a percentage (0-100)
    pub fn pop_percent(&self) -> Decimal {
        self.pop.saturating_mul(Decimal::ONE_HUNDRED)
    }
}

/// Per-day outlook, only present in the legacy one-call payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailySummary {
    pub timestamp: DateTime<Utc>,
    pub temp_max_celsius: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uv_index: Option<Decimal>,
}

/// Forecast for the configured location, periods ordered earliest first
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Forecast {
    pub location_name: String,
    pub periods: Vec<ForecastPeriod>,
    #[serde(default)]
    pub daily: Vec<DailySummary>,
}

impl Forecast {
    /// The first `size` periods, or fewer if the forecast is shorter
    pub fn window(&self, size: usize) -> &[ForecastPeriod] {
        &self.periods[..self.periods.len().min(size)]
    }
}
