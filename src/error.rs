//! Crate-level error types.
//!
//! [`CoinwatchError`] unifies every fatal error source (configuration, HTTP
//! client construction, storage) behind a single enum so callers can match on
//! the variant they care about while still using the `?` operator for easy
//! propagation. Per-cycle failures (one symbol failing to fetch or parse) are
//! deliberately *not* here — they are recovered inside the cycle and never
//! abort the scheduler.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CoinwatchError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum CoinwatchError {
    /// Configuration was missing, malformed, or failed validation.
    #[error("configuration error: {0}")]
    Config(String),

    /// The HTTP client could not be constructed.
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    /// A storage operation (connect, schema creation, write) failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
