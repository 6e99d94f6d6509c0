//! External API integrations

pub mod line;
pub mod weather;

pub use line::{LineMessage, LineMessagingClient};
pub use weather::WeatherClient;
