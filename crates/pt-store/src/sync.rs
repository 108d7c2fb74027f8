//! Sync reconciliation
//!
//! A sync pulls production entries and off-days from the remote and, for
//! each pull that succeeds, replaces the local collection outright. There
//! is no merge and no timestamp comparison: the last pull wins. A pull that
//! fails leaves its local collection exactly as it was.

use pt_core::error::PtResult;
use pt_models::{OffDay, ProductionEntry};
use pt_remote::Resource;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::cache::keys;
use crate::events::{Collection, StoreEvent};
use crate::store::RecordStore;

/// What a single pull did to its collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PullOutcome {
    /// Local collection replaced with `records` remote rows
    Applied { records: usize },
    /// The remote returned nothing usable; local data kept
    Unavailable,
    /// The remote answered with data of the wrong shape; local data kept
    Malformed { reason: String },
    /// Remote sync is disabled
    Skipped,
}

impl PullOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, PullOutcome::Applied { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub production: PullOutcome,
    pub off_days: PullOutcome,
}

impl SyncReport {
    pub fn skipped() -> Self {
        Self {
            production: PullOutcome::Skipped,
            off_days: PullOutcome::Skipped,
        }
    }
}

fn decode<T: DeserializeOwned>(resource: Resource, pulled: Option<Value>) -> Result<Vec<T>, PullOutcome> {
    let Some(value) = pulled else {
        return Err(PullOutcome::Unavailable);
    };
    serde_json::from_value(value).map_err(|e| {
        warn!(%resource, error = %e, "Pulled data has an unexpected shape");
        PullOutcome::Malformed {
            reason: e.to_string(),
        }
    })
}

impl RecordStore {
    /// Pull production entries and off-days and overwrite the local copies.
    ///
    /// Pulled data is written to the cache only; it is not mirrored back.
    /// In-flight mirror pushes are not awaited.
    pub async fn sync(&self) -> PtResult<SyncReport> {
        if !self.remote().is_enabled() {
            return Ok(SyncReport::skipped());
        }

        let remote = self.remote().clone();
        let (production, off_days) = tokio::join!(
            remote.fetch(Resource::Production),
            remote.fetch(Resource::OffDays),
        );
        let production = decode::<ProductionEntry>(Resource::Production, production);
        let off_days = decode::<OffDay>(Resource::OffDays, off_days);

        let report = {
            let _guard = self.lock();
            SyncReport {
                production: self.apply(keys::PRODUCTION, Collection::Entries, production)?,
                off_days: self.apply(keys::OFF_DAYS, Collection::OffDays, off_days)?,
            }
        };

        info!(
            production = ?report.production,
            off_days = ?report.off_days,
            "Sync finished"
        );
        self.notify(StoreEvent::Synced {
            report: report.clone(),
        });
        Ok(report)
    }

    fn apply<T: Serialize>(
        &self,
        key: &str,
        collection: Collection,
        pulled: Result<Vec<T>, PullOutcome>,
    ) -> PtResult<PullOutcome> {
        match pulled {
            Ok(records) => {
                self.write(key, &records)?;
                self.notify(StoreEvent::Changed { collection });
                Ok(PullOutcome::Applied {
                    records: records.len(),
                })
            }
            Err(outcome) => Ok(outcome),
        }
    }
}
