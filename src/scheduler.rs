//! The poll scheduler: the single producer driving the pipeline.
//!
//! Each cycle fetches every configured symbol in order, extracts its fields,
//! assembles an immutable [`Snapshot`], publishes it atomically, and — when
//! the persistence threshold has elapsed — hands it to the store. Failures
//! are contained per symbol (fetch/extract) or per threshold (persistence);
//! nothing short of the shutdown signal stops the loop.

use std::time::{Duration, Instant};

use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::extract::extract_record;
use crate::fetch::QuoteFetcher;
use crate::models::{AssetRecord, Snapshot};
use crate::publish::SnapshotPublisher;
use crate::store::Store;

/// Tracks elapsed time since the last persistence trigger.
///
/// The timer resets when it fires, before the write is attempted, so a
/// persistently failing store cannot cause a retry storm.
struct PersistenceCycle {
    last: Instant,
    threshold: Duration,
}

impl PersistenceCycle {
    fn new(threshold: Duration) -> Self {
        PersistenceCycle {
            last: Instant::now(),
            threshold,
        }
    }

    /// Returns whether the threshold has elapsed, resetting the timer if so.
    fn due(&mut self) -> bool {
        if self.last.elapsed() >= self.threshold {
            self.last = Instant::now();
            true
        } else {
            false
        }
    }
}

/// Runs the fetch → extract → publish → persist loop.
pub struct Scheduler<F> {
    config: AppConfig,
    fetcher: F,
    publisher: SnapshotPublisher,
    store: Store,
    persistence: PersistenceCycle,
    cycle: u64,
}

impl<F: QuoteFetcher> Scheduler<F> {
    pub fn new(config: AppConfig, fetcher: F, publisher: SnapshotPublisher, store: Store) -> Self {
        let persistence = PersistenceCycle::new(config.persist_after);
        Scheduler {
            config,
            fetcher,
            publisher,
            store,
            persistence,
            cycle: 0,
        }
    }

    /// Runs cycles until `shutdown` flips to `true`.
    ///
    /// The signal is checked at the top of each cycle and raced against both
    /// in-flight fetch work and the inter-cycle sleep, so shutdown does not
    /// wait out a slow symbol or the full sleep interval. A cycle cancelled
    /// mid-flight publishes nothing.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!(
            symbols = self.config.symbols.len(),
            poll_secs = self.config.poll_interval.as_secs(),
            persist_secs = self.config.persist_after.as_secs(),
            "Poll scheduler started"
        );

        loop {
            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                () = self.run_cycle() => {}
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        break;
                    }
                }
            }

            tokio::select! {
                () = tokio::time::sleep(self.config.poll_interval) => {}
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Poll scheduler stopped");
    }

    /// Executes exactly one poll cycle.
    ///
    /// A fetch failure for one symbol yields an invalid record for that
    /// symbol; the cycle continues for the rest. The snapshot is published
    /// only once fully assembled, and persisted (when due) only after
    /// publication.
    pub async fn run_cycle(&mut self) {
        let mut records = Vec::with_capacity(self.config.symbols.len());
        for symbol in &self.config.symbols {
            let record = match self.fetcher.fetch(symbol).await {
                Ok(raw) => extract_record(symbol.clone(), &raw),
                Err(e) => {
                    warn!(symbol = %symbol, "Fetch failed: {e}");
                    AssetRecord::absent(symbol.clone())
                }
            };
            if !record.is_valid() {
                warn!(symbol = %symbol, "Record invalid for this cycle");
            }
            records.push(record);
        }

        self.cycle += 1;
        let snapshot = self.publisher.publish(Snapshot::new(self.cycle, records));

        if self.persistence.due() {
            if let Err(e) = self.store.persist(&snapshot).await {
                error!("Persistence failed, continuing to poll: {e}");
            }
        }
    }
}
