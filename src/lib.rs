//! Polling crypto price ticker.
//!
//! Continuously polls a price feed for a fixed symbol set, extracts a fixed
//! field set from each raw response, publishes an immutable snapshot for
//! concurrent readers, and appends history rows to per-symbol SQLite tables
//! on a longer cadence.

pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod models;
pub mod publish;
pub mod scheduler;
pub mod store;

pub use error::{CoinwatchError, Result};
