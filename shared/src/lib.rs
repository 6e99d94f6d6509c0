//! Shared types and pure alert logic for the Inburi Weather Alert broadcaster
//!
//! This crate contains everything that does not touch the network: forecast
//! models, provider payload decoding, the forecast evaluator and the message
//! composer. The `notifier` binary wires these up to the weather provider and
//! the LINE broadcast endpoint.

pub mod composer;
pub mod evaluator;
pub mod models;
pub mod time;
pub mod types;

pub use composer::*;
pub use evaluator::*;
pub use models::*;
pub use time::*;
pub use types::*;
