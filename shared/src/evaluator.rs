//! Forecast evaluation
//!
//! Turns a [`Forecast`] into zero or more [`Finding`]s. Evaluation is total:
//! short or partially populated forecasts are evaluated as-is and missing
//! values (already defaulted to zero by decoding) never trigger an alert.

use chrono::{DateTime, Timelike, Utc};
use rust_decimal::Decimal;

use crate::models::{
    EvaluationRules, Finding, Forecast, ForecastPeriod, HeatFinding, RainCategory, RainFinding,
};

/// Evaluate a forecast, returning findings ordered heat first, then rain
pub fn evaluate(forecast: &Forecast, rules: &EvaluationRules, now: DateTime<Utc>) -> Vec<Finding> {
    let mut findings = Vec::new();
    if let Some(heat) = detect_heat(forecast, rules, now) {
        findings.push(Finding::Heat(heat));
    }
    if let Some(rain) = detect_rain(forecast, rules, now) {
        findings.push(Finding::Rain(rain));
    }
    findings
}

/// Check the lookahead window (or today's outlook, with UV) for extreme heat
pub fn detect_heat(
    forecast: &Forecast,
    rules: &EvaluationRules,
    now: DateTime<Utc>,
) -> Option<HeatFinding> {
    if rules.morning_only_heat_check && now.hour() >= rules.morning_cutoff_hour_utc {
        return None;
    }

    if rules.has_uv_signal {
        if let Some(today) = forecast.daily.first() {
            let uv_index = today.uv_index.unwrap_or(Decimal::ZERO);
            let max_temp = today.temp_max_celsius;
            let fires =
                uv_index > rules.uv_index_threshold || max_temp > rules.heat_threshold_celsius;
            return fires.then_some(HeatFinding {
                max_temp_celsius: max_temp,
                uv_index: Some(uv_index),
            });
        }
    }

    let max_temp = max_temperature(forecast.window(rules.lookahead_periods))?;
    (max_temp > rules.heat_threshold_celsius).then_some(HeatFinding {
        max_temp_celsius: max_temp,
        uv_index: None,
    })
}

/// Find the earliest significant rain period in the lookahead window
///
/// Periods that started before `now` are skipped so an elapsed slot is never
/// announced as upcoming rain.
pub fn detect_rain(
    forecast: &Forecast,
    rules: &EvaluationRules,
    now: DateTime<Utc>,
) -> Option<RainFinding> {
    forecast
        .window(rules.lookahead_periods)
        .iter()
        .filter(|period| period.timestamp >= now)
        .find(|period| is_significant_rain(period))
        .map(|period| RainFinding {
            local_time: period.timestamp.with_timezone(&rules.display_offset),
            category: RainCategory::from_code(period.condition_code),
            pop_percent: period.pop_percent(),
            provider_description: period.description.clone(),
        })
}

/// Whether a period's condition code and precipitation probability together
/// clear the threshold for its rain category
pub fn is_significant_rain(period: &ForecastPeriod) -> bool {
    RainCategory::from_code(period.condition_code)
        .min_pop_percent()
        .is_some_and(|min| period.pop_percent() >= min)
}

/// Highest max-temperature across the periods, `None` if there are none
pub fn max_temperature(periods: &[ForecastPeriod]) -> Option<Decimal> {
    periods.iter().map(|p| p.temp_max_celsius).max()
}
