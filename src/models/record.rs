use std::collections::HashMap;

use super::symbol::AssetSymbol;

/// Placeholder shown for an asset whose record is invalid for the cycle.
pub const PRICE_PLACEHOLDER: &str = "--";

/// The fixed set of fields extracted from a raw quote.
///
/// The upstream key name and the history-table column name are identical
/// for every field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Price,
    LastVolume,
    LastVolumeTo,
    VolumeDay,
    VolumeDayTo,
    Volume24Hour,
    Volume24HourTo,
    High24Hour,
    Low24Hour,
    MktCap,
    Supply,
    TotalVolume24H,
    TotalVolume24HTo,
    LastUpdate,
}

impl Field {
    /// All recognized fields, in column order.
    pub const ALL: [Field; 14] = [
        Field::Price,
        Field::LastVolume,
        Field::LastVolumeTo,
        Field::VolumeDay,
        Field::VolumeDayTo,
        Field::Volume24Hour,
        Field::Volume24HourTo,
        Field::High24Hour,
        Field::Low24Hour,
        Field::MktCap,
        Field::Supply,
        Field::TotalVolume24H,
        Field::TotalVolume24HTo,
        Field::LastUpdate,
    ];

    /// The upstream payload key, which doubles as the column name.
    pub fn key(self) -> &'static str {
        match self {
            Field::Price => "PRICE",
            Field::LastVolume => "LASTVOLUME",
            Field::LastVolumeTo => "LASTVOLUMETO",
            Field::VolumeDay => "VOLUMEDAY",
            Field::VolumeDayTo => "VOLUMEDAYTO",
            Field::Volume24Hour => "VOLUME24HOUR",
            Field::Volume24HourTo => "VOLUME24HOURTO",
            Field::High24Hour => "HIGH24HOUR",
            Field::Low24Hour => "LOW24HOUR",
            Field::MktCap => "MKTCAP",
            Field::Supply => "SUPPLY",
            Field::TotalVolume24H => "TOTALVOLUME24H",
            Field::TotalVolume24HTo => "TOTALVOLUME24HTO",
            Field::LastUpdate => "LASTUPDATE",
        }
    }
}

/// Parsed readings for one asset at one poll cycle.
///
/// A field that could not be located in the raw quote is `None`, never
/// defaulted to zero. A record with any absent field is invalid: it is
/// skipped by the persistence writer but still published so display
/// consumers can render a placeholder.
#[derive(Debug, Clone)]
pub struct AssetRecord {
    pub symbol: AssetSymbol,
    pub price: Option<f64>,
    pub last_volume: Option<f64>,
    pub last_volume_to: Option<f64>,
    pub volume_day: Option<f64>,
    pub volume_day_to: Option<f64>,
    pub volume_24h: Option<f64>,
    pub volume_24h_to: Option<f64>,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
    pub market_cap: Option<f64>,
    pub supply: Option<f64>,
    pub total_volume_24h: Option<f64>,
    pub total_volume_24h_to: Option<f64>,
    pub last_update: Option<f64>,
}

impl AssetRecord {
    /// A record with every field absent (fetch failed for the symbol).
    pub fn absent(symbol: AssetSymbol) -> Self {
        Self::from_fields(symbol, &HashMap::new())
    }

    /// Builds a record from the extractor's field map.
    pub fn from_fields(symbol: AssetSymbol, fields: &HashMap<Field, f64>) -> Self {
        AssetRecord {
            symbol,
            price: fields.get(&Field::Price).copied(),
            last_volume: fields.get(&Field::LastVolume).copied(),
            last_volume_to: fields.get(&Field::LastVolumeTo).copied(),
            volume_day: fields.get(&Field::VolumeDay).copied(),
            volume_day_to: fields.get(&Field::VolumeDayTo).copied(),
            volume_24h: fields.get(&Field::Volume24Hour).copied(),
            volume_24h_to: fields.get(&Field::Volume24HourTo).copied(),
            high_24h: fields.get(&Field::High24Hour).copied(),
            low_24h: fields.get(&Field::Low24Hour).copied(),
            market_cap: fields.get(&Field::MktCap).copied(),
            supply: fields.get(&Field::Supply).copied(),
            total_volume_24h: fields.get(&Field::TotalVolume24H).copied(),
            total_volume_24h_to: fields.get(&Field::TotalVolume24HTo).copied(),
            last_update: fields.get(&Field::LastUpdate).copied(),
        }
    }

    /// Returns the reading for `field`, if it was extracted.
    pub fn get(&self, field: Field) -> Option<f64> {
        match field {
            Field::Price => self.price,
            Field::LastVolume => self.last_volume,
            Field::LastVolumeTo => self.last_volume_to,
            Field::VolumeDay => self.volume_day,
            Field::VolumeDayTo => self.volume_day_to,
            Field::Volume24Hour => self.volume_24h,
            Field::Volume24HourTo => self.volume_24h_to,
            Field::High24Hour => self.high_24h,
            Field::Low24Hour => self.low_24h,
            Field::MktCap => self.market_cap,
            Field::Supply => self.supply,
            Field::TotalVolume24H => self.total_volume_24h,
            Field::TotalVolume24HTo => self.total_volume_24h_to,
            Field::LastUpdate => self.last_update,
        }
    }

    /// A record is valid only when every recognized field was extracted.
    pub fn is_valid(&self) -> bool {
        Field::ALL.iter().all(|field| self.get(*field).is_some())
    }

    /// The price rendered for display, or a placeholder for an invalid record.
    pub fn display_price(&self) -> String {
        if !self.is_valid() {
            return PRICE_PLACEHOLDER.to_string();
        }
        match self.price {
            Some(price) => price.to_string(),
            None => PRICE_PLACEHOLDER.to_string(),
        }
    }
}
