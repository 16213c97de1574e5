//! Application configuration loaded from environment variables.
//!
//! All options have defaults matching the public CryptoCompare endpoint and
//! its request-rate limits; every variable can be overridden:
//! - `COINWATCH_SYMBOLS` — comma-separated asset symbols to track
//! - `COINWATCH_QUOTE_CURRENCY` — fiat currency quotes are requested in
//! - `COINWATCH_ENDPOINT` — price feed URL (symbol and currency appended)
//! - `COINWATCH_POLL_INTERVAL_SECS` — sleep between poll cycles
//! - `COINWATCH_PERSIST_AFTER_SECS` — elapsed time before a snapshot is persisted
//! - `COINWATCH_FETCH_TIMEOUT_SECS` — per-request HTTP timeout
//! - `COINWATCH_DATABASE_URL` — SQLite database the history is appended to

use std::time::Duration;

use crate::error::CoinwatchError;
use crate::models::AssetSymbol;

/// Default tracked symbols.
const DEFAULT_SYMBOLS: &str = "LTC,ETH,XMR,XVG,XLM,ZEC,XRP,REQ,BCH,LINK,NXT,BTC";

/// Default price feed endpoint.
const DEFAULT_ENDPOINT: &str = "https://min-api.cryptocompare.com/data/pricemultifull";

/// Default quote currency.
const DEFAULT_QUOTE_CURRENCY: &str = "USD";

/// Default seconds between poll cycles, chosen to respect upstream rate limits.
const DEFAULT_POLL_INTERVAL_SECS: u64 = 18;

/// Default seconds of elapsed time before a snapshot is written to storage.
const DEFAULT_PERSIST_AFTER_SECS: u64 = 90;

/// Default per-request timeout so one unresponsive symbol cannot stall a cycle.
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Default SQLite database location.
const DEFAULT_DATABASE_URL: &str = "sqlite:coins.db";

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Tracked symbols, in the order cycles fetch and snapshots list them.
    pub symbols: Vec<AssetSymbol>,
    pub quote_currency: String,
    pub endpoint: String,
    pub poll_interval: Duration,
    pub persist_after: Duration,
    pub fetch_timeout: Duration,
    pub database_url: String,
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`CoinwatchError::Config`] if the symbol list is empty, a symbol
/// fails validation, or a duration variable is not a positive integer.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let raw_symbols =
        non_empty_var("COINWATCH_SYMBOLS").unwrap_or_else(|| DEFAULT_SYMBOLS.to_string());
    let symbols = parse_symbols(&raw_symbols)?;

    Ok(AppConfig {
        symbols,
        quote_currency: non_empty_var("COINWATCH_QUOTE_CURRENCY")
            .unwrap_or_else(|| DEFAULT_QUOTE_CURRENCY.to_string()),
        endpoint: non_empty_var("COINWATCH_ENDPOINT")
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        poll_interval: secs_var("COINWATCH_POLL_INTERVAL_SECS", DEFAULT_POLL_INTERVAL_SECS)?,
        persist_after: secs_var("COINWATCH_PERSIST_AFTER_SECS", DEFAULT_PERSIST_AFTER_SECS)?,
        fetch_timeout: secs_var("COINWATCH_FETCH_TIMEOUT_SECS", DEFAULT_FETCH_TIMEOUT_SECS)?,
        database_url: non_empty_var("COINWATCH_DATABASE_URL")
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
    })
}

/// Parses a comma-separated symbol list, rejecting an empty result.
fn parse_symbols(raw: &str) -> crate::Result<Vec<AssetSymbol>> {
    let symbols: Vec<AssetSymbol> = raw
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(str::parse)
        .collect::<Result<_, _>>()?;

    if symbols.is_empty() {
        return Err(CoinwatchError::Config(
            "COINWATCH_SYMBOLS must name at least one asset symbol".to_string(),
        ));
    }
    Ok(symbols)
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Reads a duration variable given in whole seconds, falling back to `default`.
fn secs_var(name: &str, default: u64) -> crate::Result<Duration> {
    match non_empty_var(name) {
        None => Ok(Duration::from_secs(default)),
        Some(raw) => {
            let secs: u64 = raw.parse().map_err(|_| {
                CoinwatchError::Config(format!("{name} must be a whole number of seconds, got {raw:?}"))
            })?;
            Ok(Duration::from_secs(secs))
        }
    }
}
