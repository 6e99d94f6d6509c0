//! End-to-end scenarios for the pure pipeline
//!
//! Provider JSON -> decode -> evaluate -> compose, with no network involved.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::{
    compose_notification, decode_forecast, evaluate, EvaluationRules, Finding, Language,
    ProviderShape, RainCategory,
};

const T: i64 = 1_717_225_200; // 2024-06-01 07:00 UTC, 14:00 in Bangkok

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn now() -> DateTime<Utc> {
    DateTime::from_timestamp(T - 3600, 0).unwrap()
}

fn single_period(temp_max: &str, pop: &str, id: i32, description: &str) -> String {
    format!(
        r#"{{"list": [{{"dt": {T}, "main": {{"temp_max": {temp_max}}}, "pop": {pop},
            "weather": [{{"id": {id}, "description": "{description}"}}]}}],
            "city": {{"name": "Inburi"}}}}"#
    )
}

fn run(body: &str, language: Language) -> (Vec<Finding>, Option<String>) {
    let forecast = decode_forecast(ProviderShape::ThreeHourly, body.as_bytes(), "Inburi").unwrap();
    let findings = evaluate(&forecast, &EvaluationRules::default(), now());
    let message = compose_notification(&findings, &forecast.location_name, "13:00", language);
    (findings, message)
}

#[test]
fn scenario_a_heat_only() {
    let (findings, message) = run(&single_period("40.2", "0.1", 800, "clear"), Language::English);

    assert_eq!(findings.len(), 1);
    match &findings[0] {
        Finding::Heat(heat) => assert_eq!(heat.max_temp_celsius, dec("40.2")),
        other => panic!("expected heat finding, got {:?}", other),
    }
    assert!(message.unwrap().contains("40.2"));
}

#[test]
fn scenario_b_heavy_rain_only() {
    let (findings, message) = run(
        &single_period("30", "0.6", 502, "heavy intensity rain"),
        Language::English,
    );

    assert_eq!(findings.len(), 1);
    match &findings[0] {
        Finding::Rain(rain) => {
            assert_eq!(rain.category, RainCategory::HeavyRain);
            assert_eq!(rain.pop_percent, Decimal::from(60));
        }
        other => panic!("expected rain finding, got {:?}", other),
    }

    let message = message.unwrap();
    assert!(message.contains("Heavy rain 🌧️ (60%)"));
    assert!(message.contains("*14:00*"));
}

#[test]
fn scenario_b_in_thai() {
    let (_, message) = run(
        &single_period("30", "0.6", 502, "ฝนหนัก"),
        Language::Thai,
    );

    let message = message.unwrap();
    assert!(message.contains("📍 อัปเดตอากาศ | Inburi"));
    assert!(message.contains("ฝนตกหนักมว๊ากก 🌧️ (60%)"));
    assert!(message.contains("*14:00 น.*"));
}

#[test]
fn scenario_c_weak_moderate_rain() {
    let (findings, message) = run(
        &single_period("30", "0.3", 501, "moderate rain"),
        Language::English,
    );

    assert!(findings.is_empty());
    assert!(message.is_none());
}

#[test]
fn scenario_d_empty_list() {
    let (findings, message) = run(r#"{"list": [], "city": {"name": "Inburi"}}"#, Language::Thai);

    assert!(findings.is_empty());
    assert!(message.is_none());
}

#[test]
fn earliest_significant_rain_wins_over_stronger_later_rain() {
    let body = format!(
        r#"{{"list": [
            {{"dt": {}, "main": {{"temp_max": 31}}, "pop": 0.72, "weather": [{{"id": 501}}]}},
            {{"dt": {}, "main": {{"temp_max": 31}}, "pop": 0.99, "weather": [{{"id": 212}}]}}
        ]}}"#,
        T,
        T + 3 * 3600
    );
    let (findings, _) = run(&body, Language::English);

    match &findings[..] {
        [Finding::Rain(rain)] => {
            assert_eq!(rain.category, RainCategory::ModerateRain);
            assert_eq!(rain.local_time.timestamp(), T);
        }
        other => panic!("expected one rain finding, got {:?}", other),
    }
}

#[test]
fn heat_and_rain_compose_in_order() {
    let body = format!(
        r#"{{"list": [
            {{"dt": {}, "main": {{"temp_max": 39.4}}, "pop": 0.0, "weather": [{{"id": 800}}]}},
            {{"dt": {}, "main": {{"temp_max": 33}}, "pop": 0.45, "weather": [{{"id": 201}}]}}
        ], "city": {{"name": "Inburi"}}}}"#,
        T,
        T + 3 * 3600
    );
    let (findings, message) = run(&body, Language::English);

    assert_eq!(findings.len(), 2);
    let message = message.unwrap();
    assert!(message.contains("39.4°C"));
    assert!(message.contains("Storm warning! ⛈️ (45%)"));
    assert!(message.contains("- - - - -"));
}

#[test]
fn legacy_one_call_payload_with_uv() {
    let body = format!(
        r#"{{"daily": [{{"dt": {}, "temp": {{"max": 35.2}}, "uvi": 10.4}}],
            "hourly": [{{"dt": {}, "temp": 33, "pop": 0.1, "weather": [{{"id": 803}}]}}]}}"#,
        T, T
    );
    let forecast = decode_forecast(ProviderShape::OneCall, body.as_bytes(), "Inburi").unwrap();
    let rules = EvaluationRules {
        has_uv_signal: true,
        morning_only_heat_check: true,
        ..EvaluationRules::for_shape(ProviderShape::OneCall)
    };

    let findings = evaluate(&forecast, &rules, now());
    let message = compose_notification(&findings, "Inburi", "13:00", Language::English).unwrap();
    assert!(message.contains("35.2°C"));
    assert!(message.contains("UV index as high as 10.4"));

    let afternoon = DateTime::from_timestamp(T + 6 * 3600, 0).unwrap();
    assert!(evaluate(&forecast, &rules, afternoon).is_empty());
}
