//! Quote acquisition.
//!
//! [`QuoteFetcher`] is the seam between the scheduler and the network:
//! production uses [`HttpFetcher`] over the configured endpoint, tests
//! substitute scripted fetchers. A failed fetch is a per-symbol,
//! per-cycle condition — it is reported to the scheduler as a
//! [`FetchError`] and recovered there, never escalated.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::config::AppConfig;
use crate::models::AssetSymbol;

/// Why a quote could not be obtained for one symbol this cycle.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The feed answered with a non-success HTTP status.
    #[error("{symbol}: feed returned status {status}")]
    Status { symbol: AssetSymbol, status: u16 },

    /// The request never completed (connect failure, timeout, decode).
    #[error("{symbol}: transport failure: {message}")]
    Transport { symbol: AssetSymbol, message: String },
}

/// Fetches the raw textual quote for one symbol.
pub trait QuoteFetcher {
    fn fetch(
        &self,
        symbol: &AssetSymbol,
    ) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// HTTP fetcher hitting the configured price feed endpoint.
///
/// The request timeout is set on the client, bounding every fetch
/// independently of the scheduler's inter-cycle sleep.
pub struct HttpFetcher {
    client: reqwest::Client,
    endpoint: String,
    quote_currency: String,
}

impl HttpFetcher {
    /// Builds a fetcher from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CoinwatchError::Http`](crate::CoinwatchError::Http) if the
    /// underlying client cannot be constructed.
    pub fn new(config: &AppConfig) -> crate::Result<Self> {
        Self::with_timeout(&config.endpoint, &config.quote_currency, config.fetch_timeout)
    }

    pub fn with_timeout(
        endpoint: &str,
        quote_currency: &str,
        timeout: Duration,
    ) -> crate::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(HttpFetcher {
            client,
            endpoint: endpoint.to_string(),
            quote_currency: quote_currency.to_string(),
        })
    }

    /// The request URL for one symbol.
    fn url_for(&self, symbol: &AssetSymbol) -> String {
        format!(
            "{}?fsyms={}&tsyms={}",
            self.endpoint, symbol, self.quote_currency
        )
    }
}

impl QuoteFetcher for HttpFetcher {
    fn fetch(
        &self,
        symbol: &AssetSymbol,
    ) -> impl Future<Output = Result<String, FetchError>> + Send {
        let url = self.url_for(symbol);
        let client = self.client.clone();
        let symbol = symbol.clone();

        async move {
            debug!(symbol = %symbol, url = %url, "Requesting quote");
            let response = client.get(&url).send().await.map_err(|e| {
                FetchError::Transport {
                    symbol: symbol.clone(),
                    message: e.to_string(),
                }
            })?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    symbol,
                    status: status.as_u16(),
                });
            }

            response.text().await.map_err(|e| FetchError::Transport {
                symbol,
                message: e.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_templates_symbol_and_currency() {
        let fetcher = HttpFetcher::with_timeout(
            "https://feed.example.com/pricemultifull",
            "USD",
            Duration::from_secs(5),
        )
        .unwrap();
        let symbol: AssetSymbol = "BTC".parse().unwrap();
        assert_eq!(
            fetcher.url_for(&symbol),
            "https://feed.example.com/pricemultifull?fsyms=BTC&tsyms=USD"
        );
    }
}
