//! LINE Messaging API client
//!
//! Only the broadcast endpoint is used: one text message delivered to every
//! friend of the LINE Official Account.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// LINE Messaging API client
#[derive(Clone)]
pub struct LineMessagingClient {
    channel_access_token: String,
    base_url: String,
    http_client: reqwest::Client,
}

/// LINE message types
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum LineMessage {
    #[serde(rename = "text")]
    Text { text: String },
}

/// LINE broadcast request
#[derive(Debug, Serialize)]
struct LineBroadcastRequest {
    messages: Vec<LineMessage>,
}

/// LINE API error response
#[derive(Debug, Deserialize)]
struct LineApiResponse {
    #[serde(default)]
    message: Option<String>,
}

impl LineMessagingClient {
    /// Create a new LINE messaging client against `base_url`
    /// (e.g. `https://api.line.me`)
    pub fn new(channel_access_token: String, base_url: String) -> Self {
        Self {
            channel_access_token,
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Use a client with a request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> AppResult<Self> {
        self.http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(self)
    }

    /// Broadcast a message to all friends of the channel
    pub async fn broadcast(&self, message: LineMessage) -> AppResult<()> {
        let request = LineBroadcastRequest {
            messages: vec![message],
        };

        let response = self
            .http_client
            .post(format!("{}/v2/bot/message/broadcast", self.base_url))
            .header("Authorization", format!("Bearer {}", self.channel_access_token))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::LineApi(format!("Failed to send LINE broadcast: {}", e)))?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let reason = serde_json::from_str::<LineApiResponse>(&body)
            .ok()
            .and_then(|r| r.message)
            .unwrap_or(body);
        Err(AppError::LineApi(format!("{} - {}", status, reason)))
    }
}
