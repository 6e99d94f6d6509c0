//! Error handling for the weather alert notifier
//!
//! Errors carry a stable code plus English and Thai messages so the run log
//! is readable by whoever maintains the LINE Official Account.

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to load configuration: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    // External service errors
    #[error("Weather API error: {0}")]
    WeatherApi(String),

    #[error("LINE API error: {0}")]
    LineApi(String),

    #[error("Forecast decode error: {0}")]
    Decode(#[from] shared::DecodeError),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error detail suitable for structured logging
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message_en: String,
    pub message_th: String,
}

impl AppError {
    /// Stable code identifying the error class
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Configuration(_) | AppError::ConfigLoad(_) => "CONFIGURATION_ERROR",
            AppError::WeatherApi(_) => "WEATHER_API_ERROR",
            AppError::LineApi(_) => "LINE_API_ERROR",
            AppError::Decode(_) => "FORECAST_DECODE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Bilingual description of the error
    pub fn detail(&self) -> ErrorDetail {
        let message_th = match self {
            AppError::Configuration(msg) => format!("เกิดข้อผิดพลาดในการตั้งค่า: {}", msg),
            AppError::ConfigLoad(err) => format!("โหลดการตั้งค่าไม่สำเร็จ: {}", err),
            AppError::WeatherApi(msg) => format!("ดึงข้อมูลพยากรณ์อากาศไม่สำเร็จ: {}", msg),
            AppError::LineApi(msg) => format!("เกิดข้อผิดพลาดกับ LINE API: {}", msg),
            AppError::Decode(err) => format!("อ่านข้อมูลพยากรณ์อากาศไม่ได้: {}", err),
            AppError::Internal(_) => "เกิดข้อผิดพลาดภายในระบบ".to_string(),
        };

        ErrorDetail {
            code: self.code(),
            message_en: self.to_string(),
            message_th,
        }
    }
}

/// Result type alias for the notifier
pub type AppResult<T> = Result<T, AppError>;
