//! Background mirroring of local writes to the remote
//!
//! Every push carries a full collection snapshot, so pushes of the same
//! [`WriteAction`] must reach the remote in the order the snapshots were
//! written locally. Each action gets its own lane: pushes wait for the lane
//! one at a time, and a snapshot older than one already sent is dropped as
//! [`PushOutcome::Superseded`] instead of overwriting newer remote data.
//! Different actions still push concurrently.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use pt_remote::{PushOutcome, RemoteStore, WriteAction};
use serde_json::Value;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

/// Per-action ordering of mirrored writes
#[derive(Default)]
pub(crate) struct PushQueue {
    lanes: Mutex<HashMap<WriteAction, Arc<Lane>>>,
}

#[derive(Default)]
struct Lane {
    /// Last sequence number handed out
    issued: AtomicU64,
    /// Last sequence number pushed; held for the duration of a push
    sent: tokio::sync::Mutex<u64>,
}

impl PushQueue {
    fn lane(&self, action: WriteAction) -> Arc<Lane> {
        self.lanes.lock().entry(action).or_default().clone()
    }
}

impl Lane {
    fn ticket(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn deliver(
        &self,
        seq: u64,
        remote: &dyn RemoteStore,
        action: WriteAction,
        data: Value,
    ) -> PushOutcome {
        let mut sent = self.sent.lock().await;
        if *sent >= seq {
            debug!(%action, seq, newest = *sent, "Stale snapshot not mirrored");
            return PushOutcome::Superseded;
        }
        let outcome = remote.push(action, data).await;
        *sent = seq;
        outcome
    }
}

/// A mirrored write in flight.
///
/// Dropping the handle leaves the push running; awaiting [`outcome`]
/// reports how it went.
///
/// [`outcome`]: MirrorHandle::outcome
#[derive(Debug)]
pub struct MirrorHandle {
    inner: Inner,
}

#[derive(Debug)]
enum Inner {
    Pending(JoinHandle<PushOutcome>),
    Ready(PushOutcome),
}

impl MirrorHandle {
    pub fn ready(outcome: PushOutcome) -> Self {
        Self {
            inner: Inner::Ready(outcome),
        }
    }

    /// Start pushing `data` in the background, behind any earlier push of
    /// the same action
    pub(crate) fn spawn(
        queue: &PushQueue,
        remote: Arc<dyn RemoteStore>,
        action: WriteAction,
        data: Value,
    ) -> Self {
        if !remote.is_enabled() {
            return Self::ready(PushOutcome::Disabled);
        }

        match Handle::try_current() {
            Ok(runtime) => {
                let lane = queue.lane(action);
                // Taken before spawning so the order matches the local writes
                let seq = lane.ticket();
                let task = runtime
                    .spawn(async move { lane.deliver(seq, remote.as_ref(), action, data).await });
                Self {
                    inner: Inner::Pending(task),
                }
            }
            Err(_) => {
                debug!(%action, "No async runtime; remote mirror skipped");
                Self::ready(PushOutcome::Skipped)
            }
        }
    }

    pub async fn outcome(self) -> PushOutcome {
        match self.inner {
            Inner::Ready(outcome) => outcome,
            Inner::Pending(task) => task.await.unwrap_or_else(|e| PushOutcome::Failed {
                reason: e.to_string(),
            }),
        }
    }
}
