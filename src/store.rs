//! Durable history storage.
//!
//! Each configured symbol gets its own append-only table with the fixed
//! column set from [`Field`]. Schema creation is idempotent and performed on
//! every persist call; rows for one snapshot are written inside a single
//! transaction so a failure leaves no partial snapshot behind. Invalid
//! records are skipped (never written as nulls or zeros) and logged.

use std::str::FromStr;

use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, warn};

use crate::models::{AssetSymbol, Field, Snapshot};

/// History store over a SQLite database.
///
/// The store owns the only connection pool to the database; no other
/// component touches storage.
pub struct Store {
    pool: SqlitePool,
    symbols: Vec<AssetSymbol>,
}

impl Store {
    /// Connects to `url` (created if missing) for the given symbol set.
    ///
    /// # Errors
    ///
    /// Returns [`CoinwatchError::Database`](crate::CoinwatchError::Database)
    /// if the URL is malformed or the database cannot be opened.
    pub async fn connect(url: &str, symbols: &[AssetSymbol]) -> crate::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        Ok(Store {
            pool,
            symbols: symbols.to_vec(),
        })
    }

    /// Creates the per-symbol tables if they do not exist yet.
    ///
    /// Safe to call on every persist; `CREATE TABLE IF NOT EXISTS` makes the
    /// operation idempotent.
    pub async fn ensure_schema(&self) -> crate::Result<()> {
        for symbol in &self.symbols {
            let columns: Vec<String> = Field::ALL
                .iter()
                .map(|field| format!("'{}' REAL", field.key()))
                .collect();
            let sql = format!(
                "CREATE TABLE IF NOT EXISTS \"{}\" ({})",
                symbol,
                columns.join(", ")
            );
            sqlx::query(&sql).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Appends one row per valid record of `snapshot` to its symbol's table.
    ///
    /// All rows are written within one transaction: either every valid row
    /// of the snapshot is committed or none is.
    ///
    /// # Errors
    ///
    /// Returns [`CoinwatchError::Database`](crate::CoinwatchError::Database)
    /// on schema creation or write failure; the caller decides whether to
    /// keep polling (it should).
    pub async fn persist(&self, snapshot: &Snapshot) -> crate::Result<()> {
        self.ensure_schema().await?;

        let mut tx = self.pool.begin().await?;
        let mut written = 0u32;
        for record in &snapshot.records {
            if !record.is_valid() {
                warn!(symbol = %record.symbol, "Skipping invalid record, not persisted");
                continue;
            }

            let columns: Vec<&str> = Field::ALL.iter().map(|field| field.key()).collect();
            let placeholders: Vec<&str> = Field::ALL.iter().map(|_| "?").collect();
            let sql = format!(
                "INSERT INTO \"{}\" ({}) VALUES ({})",
                record.symbol,
                columns.join(", "),
                placeholders.join(", ")
            );

            let mut query = sqlx::query(&sql);
            for field in Field::ALL {
                query = query.bind(record.get(field));
            }
            query.execute(&mut *tx).await?;
            written += 1;
        }
        tx.commit().await?;

        debug!(cycle = snapshot.cycle, rows = written, "Persisted snapshot");
        Ok(())
    }

    /// Number of history rows stored for `symbol`.
    pub async fn row_count(&self, symbol: &AssetSymbol) -> crate::Result<i64> {
        let sql = format!("SELECT COUNT(*) AS count FROM \"{symbol}\"");
        let row = sqlx::query(&sql).fetch_one(&self.pool).await?;
        Ok(row.get("count"))
    }
}
