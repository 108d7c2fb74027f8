//! Store change logging

use pt_store::StoreEvent;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Log every store event until the store is dropped
pub fn spawn_event_logger(mut events: broadcast::Receiver<StoreEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(StoreEvent::Changed { collection }) => {
                    debug!(?collection, "Collection changed");
                }
                Ok(StoreEvent::Synced { report }) => {
                    info!(production = ?report.production, off_days = ?report.off_days, "Sync applied");
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Event logger fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}
