use tokio::sync::watch;
use tracing::info;

use coinwatch::CoinwatchError;
use coinwatch::config::fetch_config;
use coinwatch::fetch::HttpFetcher;
use coinwatch::publish::{SnapshotReader, shared_state};
use coinwatch::scheduler::Scheduler;
use coinwatch::store::Store;

#[tokio::main]
async fn main() -> Result<(), CoinwatchError> {
    // Initialize tracing subscriber for logging output.
    tracing_subscriber::fmt::init();

    let config = fetch_config()?;
    let store = Store::connect(&config.database_url, &config.symbols).await?;
    let fetcher = HttpFetcher::new(&config)?;

    let (publisher, reader) = shared_state();
    tokio::spawn(console_consumer(reader));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler = tokio::spawn(Scheduler::new(config, fetcher, publisher, store).run(shutdown_rx));

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
    }
    info!("Shutdown requested");
    let _ = shutdown_tx.send(true);
    let _ = scheduler.await;

    Ok(())
}

/// Logs every asset's price whenever a new snapshot is published.
///
/// Event-driven: waits on publication instead of polling a flag, and exits
/// once the publisher is gone.
async fn console_consumer(mut reader: SnapshotReader) {
    while reader.changed().await.is_ok() {
        let Some(snapshot) = reader.current_snapshot() else {
            continue;
        };
        for record in &snapshot.records {
            info!(
                cycle = snapshot.cycle,
                symbol = %record.symbol,
                price = %record.display_price(),
                "Price update"
            );
        }
    }
}
