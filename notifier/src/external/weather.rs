//! Weather API client for fetching forecast data
//!
//! Integrates with the OpenWeatherMap API. The response body is handed to
//! [`shared::decode_forecast`] so the same decoding is used in tests.

use std::time::Duration;

use reqwest::Client;
use shared::{decode_forecast, Forecast, GpsCoordinates, Language, ProviderShape};

use crate::error::{AppError, AppResult};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
    shape: ProviderShape,
    language: Language,
}

impl WeatherClient {
    /// Create a new WeatherClient against `base_url`
    /// (e.g. `https://api.openweathermap.org/data/2.5`)
    pub fn new(
        api_key: String,
        base_url: String,
        shape: ProviderShape,
        language: Language,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            shape,
            language,
        }
    }

    /// Use a client with a request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> AppResult<Self> {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(self)
    }

    /// Fetch the forecast for a location
    ///
    /// `location_name` is used when the provider response carries no city name.
    pub async fn fetch_forecast(
        &self,
        coordinates: GpsCoordinates,
        location_name: &str,
    ) -> AppResult<Forecast> {
        let url = format!("{}/{}", self.base_url, self.shape.endpoint());

        let mut query = vec![
            ("lat", coordinates.latitude.to_string()),
            ("lon", coordinates.longitude.to_string()),
            ("appid", self.api_key.clone()),
            ("units", "metric".to_string()),
            ("lang", self.language.code().to_string()),
        ];
        if self.shape == ProviderShape::OneCall {
            query.push(("exclude", "minutely,current".to_string()));
        }

        tracing::debug!(url = %url, shape = ?self.shape, "Fetching forecast");

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| AppError::WeatherApi(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::WeatherApi(format!("{} - {}", status, body)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::WeatherApi(format!("failed to read response: {}", e)))?;

        let forecast = decode_forecast(self.shape, &body, location_name)?;
        tracing::debug!(
            periods = forecast.periods.len(),
            daily = forecast.daily.len(),
            "Forecast decoded"
        );
        Ok(forecast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn inburi() -> GpsCoordinates {
        GpsCoordinates::new(
            Decimal::from_str("15.0207").unwrap(),
            Decimal::from_str("100.3425").unwrap(),
        )
    }

    #[tokio::test]
    async fn test_fetch_three_hourly_forecast() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("lat", "15.0207"))
            .and(query_param("lon", "100.3425"))
            .and(query_param("appid", "owm-key"))
            .and(query_param("units", "metric"))
            .and(query_param("lang", "th"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"list": [{"dt": 1717200000, "main": {"temp_max": 39.1}, "pop": 0.2,
                    "weather": [{"id": 802, "description": "เมฆกระจาย"}]}],
                    "city": {"name": "Inburi"}}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = WeatherClient::new(
            "owm-key".to_string(),
            server.uri(),
            ProviderShape::ThreeHourly,
            Language::Thai,
        );
        let forecast = client.fetch_forecast(inburi(), "fallback").await.unwrap();

        assert_eq!(forecast.location_name, "Inburi");
        assert_eq!(forecast.periods.len(), 1);
        assert_eq!(forecast.periods[0].condition_code, 802);
    }

    #[tokio::test]
    async fn test_fetch_one_call_excludes_minutely() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/onecall"))
            .and(query_param("exclude", "minutely,current"))
            .and(query_param("lang", "en"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"daily": [{"dt": 1717200000, "temp": {"max": 37}, "uvi": 9.5}]}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = WeatherClient::new(
            "owm-key".to_string(),
            format!("{}/", server.uri()),
            ProviderShape::OneCall,
            Language::English,
        );
        let forecast = client.fetch_forecast(inburi(), "Inburi").await.unwrap();

        assert_eq!(forecast.location_name, "Inburi");
        assert_eq!(forecast.daily.len(), 1);
    }

    #[tokio::test]
    async fn test_non_success_status_is_weather_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"cod": 401}"#))
            .mount(&server)
            .await;

        let client = WeatherClient::new(
            "bad-key".to_string(),
            server.uri(),
            ProviderShape::ThreeHourly,
            Language::Thai,
        );
        let err = client.fetch_forecast(inburi(), "Inburi").await.unwrap_err();

        assert!(matches!(err, AppError::WeatherApi(ref msg) if msg.contains("401")));
    }

    #[tokio::test]
    async fn test_invalid_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = WeatherClient::new(
            "owm-key".to_string(),
            server.uri(),
            ProviderShape::ThreeHourly,
            Language::Thai,
        );
        let err = client.fetch_forecast(inburi(), "Inburi").await.unwrap_err();

        assert!(matches!(err, AppError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_weather_api_error() {
        let client = WeatherClient::new(
            "owm-key".to_string(),
            "http://127.0.0.1:9".to_string(),
            ProviderShape::ThreeHourly,
            Language::Thai,
        )
        .with_timeout(Duration::from_secs(2))
        .unwrap();

        let err = client.fetch_forecast(inburi(), "Inburi").await.unwrap_err();
        assert_eq!(err.code(), "WEATHER_API_ERROR");
    }
}
