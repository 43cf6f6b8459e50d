// Core modules
pub mod api;
pub mod config;
pub mod cycle;
pub mod error;
pub mod execution;
pub mod indicators;
pub mod models;
pub mod strategy;

// Re-export commonly used types
pub use api::{CoinbaseClient, Exchange};
pub use config::BotConfig;
pub use cycle::{CycleOutcome, StrategyCycle};
pub use error::{ExchangeError, SizingError};
pub use models::*;
