use chrono::{DateTime, Utc};

use super::record::AssetRecord;

/// The full, immutable result of one poll cycle.
///
/// Holds one [`AssetRecord`] per configured symbol, in configured order,
/// together with a monotonic cycle number, the capture time, and the
/// prebuilt display summary. A snapshot is assembled completely before it
/// is handed to the publisher and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub cycle: u64,
    pub captured_at: DateTime<Utc>,
    pub records: Vec<AssetRecord>,
    pub summary: String,
}

impl Snapshot {
    pub fn new(cycle: u64, records: Vec<AssetRecord>) -> Self {
        let summary = build_summary(&records);
        Snapshot {
            cycle,
            captured_at: Utc::now(),
            records,
            summary,
        }
    }

    /// Looks up the record for `symbol`, if it is part of this snapshot.
    pub fn record(&self, symbol: &str) -> Option<&AssetRecord> {
        self.records.iter().find(|r| r.symbol.as_str() == symbol)
    }
}

/// Concatenates `"SYM : $price   "` for every valid record.
fn build_summary(records: &[AssetRecord]) -> String {
    let mut summary = String::new();
    for record in records {
        if let Some(price) = record.price.filter(|_| record.is_valid()) {
            summary.push_str(&format!("{} : ${}   ", record.symbol, price));
        }
    }
    summary
}
