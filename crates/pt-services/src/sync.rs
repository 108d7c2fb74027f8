//! Manual sync

use pt_core::error::PtResult;
use pt_models::{actions, Permission, User};
use pt_store::{PullOutcome, RecordStore, SyncReport};
use serde::Serialize;
use tracing::info;

use crate::base::{authorize, record_activity};

/// Whether the remote endpoint is in use, and where it points
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteStatus {
    pub enabled: bool,
    pub url: Option<String>,
}

pub struct SyncService<'a> {
    store: &'a RecordStore,
}

impl<'a> SyncService<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Pull remote production and off-days over the local copies
    pub async fn sync(&self, actor: &User) -> PtResult<SyncReport> {
        authorize(actor, Permission::Sync)?;

        let report = self.store.sync().await?;
        record_activity(self.store, actor, actions::SYNC, describe(&report));
        Ok(report)
    }

    pub fn remote_status(&self, actor: &User) -> PtResult<RemoteStatus> {
        authorize(actor, Permission::Sync)?;
        Ok(self.status())
    }

    /// Point the remote at `url`, or disable it with `None` or a blank URL
    pub fn set_endpoint(&self, actor: &User, url: Option<String>) -> PtResult<RemoteStatus> {
        authorize(actor, Permission::ConfigureRemote)?;

        self.store.remote().set_endpoint(url)?;
        let status = self.status();
        info!(enabled = status.enabled, "Remote endpoint changed");
        record_activity(
            self.store,
            actor,
            actions::SET_REMOTE,
            match &status.url {
                Some(url) => format!("Remote endpoint set to {url}"),
                None => "Remote endpoint disabled".to_string(),
            },
        );
        Ok(status)
    }

    fn status(&self) -> RemoteStatus {
        let remote = self.store.remote();
        RemoteStatus {
            enabled: remote.is_enabled(),
            url: remote.active_url(),
        }
    }
}

fn describe(report: &SyncReport) -> String {
    fn part(name: &str, outcome: &PullOutcome) -> String {
        match outcome {
            PullOutcome::Applied { records } => format!("{name}: {records} records"),
            PullOutcome::Unavailable => format!("{name}: unavailable"),
            PullOutcome::Malformed { .. } => format!("{name}: malformed"),
            PullOutcome::Skipped => format!("{name}: skipped"),
        }
    }
    format!(
        "Synced from remote ({}, {})",
        part("production", &report.production),
        part("off-days", &report.off_days)
    )
}
