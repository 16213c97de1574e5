mod common;

use coinwatch::extract::extract_record;
use coinwatch::models::{AssetRecord, AssetSymbol, Snapshot};
use coinwatch::store::Store;
use tempfile::TempDir;

use common::raw_quote;

fn symbols(names: &[&str]) -> Vec<AssetSymbol> {
    names.iter().map(|s| s.parse().unwrap()).collect()
}

fn snapshot_for(cycle: u64, names: &[&str]) -> Snapshot {
    let records = names
        .iter()
        .map(|s| extract_record(s.parse().unwrap(), &raw_quote(s, 100.0)))
        .collect();
    Snapshot::new(cycle, records)
}

async fn open_store(dir: &TempDir, names: &[&str]) -> Store {
    let url = format!("sqlite:{}", dir.path().join("coins.db").display());
    Store::connect(&url, &symbols(names)).await.unwrap()
}

#[tokio::test]
async fn schema_creation_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir, &["BTC", "ETH"]).await;

    store.ensure_schema().await.unwrap();
    store.ensure_schema().await.unwrap();

    // Tables exist and are empty — repeated creation added nothing.
    for symbol in symbols(&["BTC", "ETH"]) {
        assert_eq!(store.row_count(&symbol).await.unwrap(), 0);
    }
}

#[tokio::test]
async fn persist_appends_one_row_per_valid_record() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir, &["BTC", "ETH"]).await;

    store.persist(&snapshot_for(1, &["BTC", "ETH"])).await.unwrap();
    store.persist(&snapshot_for(2, &["BTC", "ETH"])).await.unwrap();

    for symbol in symbols(&["BTC", "ETH"]) {
        assert_eq!(store.row_count(&symbol).await.unwrap(), 2);
    }
}

#[tokio::test]
async fn invalid_records_are_skipped_not_nulled() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir, &["BTC", "ETH"]).await;

    let valid = extract_record("BTC".parse().unwrap(), &raw_quote("BTC", 100.0));
    let invalid = AssetRecord::absent("ETH".parse().unwrap());
    let snapshot = Snapshot::new(1, vec![valid, invalid]);

    store.persist(&snapshot).await.unwrap();

    assert_eq!(store.row_count(&"BTC".parse().unwrap()).await.unwrap(), 1);
    assert_eq!(store.row_count(&"ETH".parse().unwrap()).await.unwrap(), 0);
}

#[tokio::test]
async fn persist_creates_missing_schema_on_first_use() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir, &["XMR"]).await;

    // No explicit ensure_schema call; persist must bootstrap the table.
    store.persist(&snapshot_for(1, &["XMR"])).await.unwrap();
    assert_eq!(store.row_count(&"XMR".parse().unwrap()).await.unwrap(), 1);
}
