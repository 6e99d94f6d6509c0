//! Alert findings and the rules that produce them

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::provider::ProviderShape;

/// Condition codes in the heavy rain family
pub const HEAVY_RAIN_CODES: [i32; 5] = [502, 503, 504, 521, 522];

/// Condition code for moderate rain
pub const MODERATE_RAIN_CODE: i32 = 501;

/// Rain category derived from a weather condition code
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RainCategory {
    Thunderstorm,
    HeavyRain,
    ModerateRain,
    Other,
}

impl RainCategory {
    pub fn from_code(code: i32) -> Self {
        if code / 100 == 2 {
            RainCategory::Thunderstorm
        } else if HEAVY_RAIN_CODES.contains(&code) {
            RainCategory::HeavyRain
        } else if code == MODERATE_RAIN_CODE {
            RainCategory::ModerateRain
        } else {
            RainCategory::Other
        }
    }

    /// Minimum probability of precipitation (percent) for the category to
    /// count as significant. `None` means the category never qualifies.
    pub fn min_pop_percent(&self) -> Option<Decimal> {
        match self {
            RainCategory::Thunderstorm => Some(Decimal::from(40)),
            RainCategory::HeavyRain => Some(Decimal::from(50)),
            RainCategory::ModerateRain => Some(Decimal::from(70)),
            RainCategory::Other => None,
        }
    }
}

/// Heat finding: hottest temperature seen in the evaluated window
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeatFinding {
    pub max_temp_celsius: Decimal,
    /// Only set when the UV rule was in effect
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uv_index: Option<Decimal>,
}

/// Rain finding: the earliest significant rain period in the window
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RainFinding {
    pub local_time: DateTime<FixedOffset>,
    pub category: RainCategory,
    pub pop_percent: Decimal,
    /// Provider description, used when the category has no phrasing of its own
    pub provider_description: String,
}

/// A noteworthy condition found in the forecast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    Heat(HeatFinding),
    Rain(RainFinding),
}

/// Thresholds and rule variant used by the evaluator
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationRules {
    /// Number of leading periods making up the 24 hour lookahead window
    pub lookahead_periods: usize,
    pub heat_threshold_celsius: Decimal,
    pub uv_index_threshold: Decimal,
    /// Use the daily UV index alongside temperature
    pub has_uv_signal: bool,
    /// Only run the heat check before `morning_cutoff_hour_utc`
    pub morning_only_heat_check: bool,
    pub morning_cutoff_hour_utc: u32,
    /// Offset used to display rain times
    pub display_offset: FixedOffset,
}

impl EvaluationRules {
    /// Default rules for a provider shape
    pub fn for_shape(shape: ProviderShape) -> Self {
        Self {
            lookahead_periods: shape.lookahead_periods(),
            ..Self::default()
        }
    }
}

impl Default for EvaluationRules {
    fn default() -> Self {
        Self {
            lookahead_periods: ProviderShape::ThreeHourly.lookahead_periods(),
            heat_threshold_celsius: Decimal::from(38),
            uv_index_threshold: Decimal::from(9),
            has_uv_signal: false,
            morning_only_heat_check: false,
            morning_cutoff_hour_utc: 8,
            display_offset: crate::time::bangkok_offset(),
        }
    }
}
