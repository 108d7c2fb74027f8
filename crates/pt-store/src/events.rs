//! Change notifications

use serde::Serialize;

use crate::sync::SyncReport;

/// A collection owned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Entries,
    OffDays,
    Users,
    Logs,
    Session,
}

/// Broadcast to subscribers after the store changes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StoreEvent {
    Changed { collection: Collection },
    Synced { report: SyncReport },
}
