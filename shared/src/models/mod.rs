//! Domain models for the weather alert broadcaster

mod alert;
mod forecast;
mod provider;

pub use alert::*;
pub use forecast::*;
pub use provider::*;
