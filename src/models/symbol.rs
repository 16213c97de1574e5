use std::fmt;
use std::str::FromStr;

use crate::error::CoinwatchError;

/// Ticker identifying one tracked asset (e.g. `BTC`).
///
/// Symbols are normalized to uppercase at construction and restricted to
/// ASCII alphanumerics, which also makes them safe to embed as a per-asset
/// table name in the history store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetSymbol(String);

impl AssetSymbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for AssetSymbol {
    type Err = CoinwatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CoinwatchError::Config("empty asset symbol".to_string()));
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CoinwatchError::Config(format!(
                "invalid asset symbol {trimmed:?}: only ASCII alphanumerics are allowed"
            )));
        }
        Ok(AssetSymbol(trimmed.to_ascii_uppercase()))
    }
}

impl fmt::Display for AssetSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
