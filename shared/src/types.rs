//! Common types used across the workspace

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// GPS coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: Decimal,
    pub longitude: Decimal,
}

impl GpsCoordinates {
    pub fn new(latitude: Decimal, longitude: Decimal) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Supported message languages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    #[serde(alias = "th")]
    Thai,
    #[serde(alias = "en")]
    English,
}

impl Language {
    /// Language code understood by the weather provider's `lang` parameter
    pub fn code(&self) -> &'static str {
        match self {
            Language::Thai => "th",
            Language::English => "en",
        }
    }
}
