//! Shared-state publication between the scheduler and its consumers.
//!
//! The scheduler is the single writer; any number of readers observe the
//! latest snapshot without blocking it. Publication is an atomic swap of an
//! immutable `Arc<Snapshot>` through a watch channel: a reader either sees
//! the previous complete snapshot or the new complete snapshot, never a
//! half-built one, and never an older snapshot after a newer one.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::models::Snapshot;

/// Summary shown before the first cycle has published anything.
pub const SUMMARY_PENDING: &str = "grabbing data";

/// Creates a connected publisher/reader pair.
///
/// Additional readers are cloned from the first or obtained via
/// [`SnapshotPublisher::subscribe`].
pub fn shared_state() -> (SnapshotPublisher, SnapshotReader) {
    let (tx, rx) = watch::channel(None);
    (SnapshotPublisher { tx }, SnapshotReader { rx })
}

/// Write half: owned by the poll scheduler.
pub struct SnapshotPublisher {
    tx: watch::Sender<Option<Arc<Snapshot>>>,
}

impl SnapshotPublisher {
    /// Publishes a fully assembled snapshot, replacing the previous one
    /// wholesale, and returns a shared handle to it.
    pub fn publish(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        let snapshot = Arc::new(snapshot);
        debug!(cycle = snapshot.cycle, "Publishing snapshot");
        // Readers may all be gone; the scheduler keeps polling regardless.
        let _ = self.tx.send(Some(Arc::clone(&snapshot)));
        snapshot
    }

    /// Creates a new reader observing this publisher.
    pub fn subscribe(&self) -> SnapshotReader {
        SnapshotReader {
            rx: self.tx.subscribe(),
        }
    }
}

/// Read half: cheap to clone, one per consumer.
#[derive(Clone)]
pub struct SnapshotReader {
    rx: watch::Receiver<Option<Arc<Snapshot>>>,
}

impl SnapshotReader {
    /// The most recently published snapshot, or `None` before the first cycle.
    ///
    /// Never blocks on the publisher.
    pub fn current_snapshot(&self) -> Option<Arc<Snapshot>> {
        self.rx.borrow().clone()
    }

    /// The display summary of the current snapshot, or a placeholder before
    /// the first cycle. Never blocks.
    pub fn current_summary(&self) -> String {
        match self.current_snapshot() {
            Some(snapshot) => snapshot.summary.clone(),
            None => SUMMARY_PENDING.to_string(),
        }
    }

    /// Waits until a snapshot newer than the last observed one is published.
    ///
    /// Returns `Err` once the publisher has been dropped, letting consumer
    /// loops terminate instead of spinning.
    pub async fn changed(&mut self) -> Result<(), watch::error::RecvError> {
        self.rx.changed().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssetRecord, Snapshot};

    fn snapshot(cycle: u64) -> Snapshot {
        Snapshot::new(cycle, vec![AssetRecord::absent("BTC".parse().unwrap())])
    }

    #[test]
    fn placeholder_before_first_publish() {
        let (_publisher, reader) = shared_state();
        assert!(reader.current_snapshot().is_none());
        assert_eq!(reader.current_summary(), SUMMARY_PENDING);
    }

    #[test]
    fn last_writer_wins() {
        let (publisher, reader) = shared_state();
        publisher.publish(snapshot(1));
        publisher.publish(snapshot(2));
        assert_eq!(reader.current_snapshot().unwrap().cycle, 2);
    }

    #[tokio::test]
    async fn changed_wakes_on_publish() {
        let (publisher, mut reader) = shared_state();
        publisher.publish(snapshot(7));
        reader.changed().await.unwrap();
        assert_eq!(reader.current_snapshot().unwrap().cycle, 7);
    }

    #[tokio::test]
    async fn changed_errors_after_publisher_drop() {
        let (publisher, mut reader) = shared_state();
        drop(publisher);
        assert!(reader.changed().await.is_err());
    }
}
