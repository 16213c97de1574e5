//! Shared test fixtures: raw quote payloads and a scripted fetcher.
#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;

use coinwatch::fetch::{FetchError, QuoteFetcher};
use coinwatch::models::AssetSymbol;

/// Builds a realistic `pricemultifull`-shaped raw quote for `symbol`.
///
/// Contains the nested `RAW` section with every recognized key (price taken
/// from the argument, remaining fields derived from it), unrecognized
/// bookkeeping keys, and a trailing `DISPLAY` section that repeats `PRICE`
/// with a currency marker and surrounding quotes.
pub fn raw_quote(symbol: &str, price: f64) -> String {
    format!(
        concat!(
            "{{\"RAW\":{{\"{sym}\":{{\"USD\":{{",
            "\"TYPE\":\"5\",\"MARKET\":\"CCCAGG\",\"FROMSYMBOL\":\"{sym}\",",
            "\"TOSYMBOL\":\"USD\",\"FLAGS\":\"2\",",
            "\"PRICE\":{price},\"LASTUPDATE\":1524507119,",
            "\"LASTVOLUME\":0.25,\"LASTVOLUMETO\":1625.5,",
            "\"LASTTRADEID\":\"44944228\",",
            "\"VOLUMEDAY\":110449.9,\"VOLUMEDAYTO\":752573430.9,",
            "\"VOLUME24HOUR\":126169.38,\"VOLUME24HOURTO\":858237047.4,",
            "\"HIGH24HOUR\":6925.65,\"LOW24HOUR\":6466.72,",
            "\"LASTMARKET\":\"Coinbase\",",
            "\"SUPPLY\":16968137,\"MKTCAP\":116912345678.5,",
            "\"TOTALVOLUME24H\":878612.5,\"TOTALVOLUME24HTO\":6043593410.9}}}}}},",
            "\"DISPLAY\":{{\"{sym}\":{{\"USD\":{{",
            "\"PRICE\":\"$ {price}\",\"MKTCAP\":\"$ 116.91 B\"}}}}}}}}"
        ),
        sym = symbol,
        price = price,
    )
}

/// What the scripted fetcher should do for one symbol.
#[derive(Clone)]
pub enum Scripted {
    Quote(String),
    Status(u16),
    Transport(String),
}

/// In-memory fetcher serving canned responses per symbol.
#[derive(Default)]
pub struct FixtureFetcher {
    responses: HashMap<String, Scripted>,
}

impl FixtureFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quote(mut self, symbol: &str, raw: impl Into<String>) -> Self {
        self.responses
            .insert(symbol.to_string(), Scripted::Quote(raw.into()));
        self
    }

    pub fn status(mut self, symbol: &str, status: u16) -> Self {
        self.responses
            .insert(symbol.to_string(), Scripted::Status(status));
        self
    }

    pub fn transport(mut self, symbol: &str, message: &str) -> Self {
        self.responses
            .insert(symbol.to_string(), Scripted::Transport(message.to_string()));
        self
    }
}

impl QuoteFetcher for FixtureFetcher {
    fn fetch(
        &self,
        symbol: &AssetSymbol,
    ) -> impl Future<Output = Result<String, FetchError>> + Send {
        let result = match self.responses.get(symbol.as_str()) {
            Some(Scripted::Quote(raw)) => Ok(raw.clone()),
            Some(Scripted::Status(status)) => Err(FetchError::Status {
                symbol: symbol.clone(),
                status: *status,
            }),
            Some(Scripted::Transport(message)) => Err(FetchError::Transport {
                symbol: symbol.clone(),
                message: message.clone(),
            }),
            None => Err(FetchError::Transport {
                symbol: symbol.clone(),
                message: "no scripted response".to_string(),
            }),
        };
        std::future::ready(result)
    }
}
