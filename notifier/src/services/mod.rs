//! Services for the weather alert notifier

pub mod alert;

pub use alert::{AlertService, RunOutcome};
