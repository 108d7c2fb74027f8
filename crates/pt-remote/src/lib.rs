//! Remote sync adapter
//!
//! Best-effort reads and writes against a single spreadsheet-backed HTTP
//! endpoint. Nothing here returns an error to the caller at request time:
//! failed reads come back as `None` and failed writes as a `PushOutcome`.

pub mod memory;
pub mod sheets;

use std::fmt;

use async_trait::async_trait;
use pt_core::error::{PtError, PtResult};
use serde::Serialize;
use serde_json::Value;
use url::Url;

pub use memory::MemoryRemote;
pub use sheets::SheetsClient;

/// Collections the remote can serve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Resource {
    #[serde(rename = "getProduction")]
    Production,
    #[serde(rename = "getOffDays")]
    OffDays,
    #[serde(rename = "getUsers")]
    Users,
}

impl Resource {
    pub fn action(&self) -> &'static str {
        match self {
            Resource::Production => "getProduction",
            Resource::OffDays => "getOffDays",
            Resource::Users => "getUsers",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action())
    }
}

/// Full-collection writes the remote accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WriteAction {
    #[serde(rename = "saveProduction")]
    SaveProduction,
    #[serde(rename = "saveOffDays")]
    SaveOffDays,
    #[serde(rename = "saveUsers")]
    SaveUsers,
}

impl WriteAction {
    pub fn action(&self) -> &'static str {
        match self {
            WriteAction::SaveProduction => "saveProduction",
            WriteAction::SaveOffDays => "saveOffDays",
            WriteAction::SaveUsers => "saveUsers",
        }
    }

    /// The resource a successful write replaces
    pub fn resource(&self) -> Resource {
        match self {
            WriteAction::SaveProduction => Resource::Production,
            WriteAction::SaveOffDays => Resource::OffDays,
            WriteAction::SaveUsers => Resource::Users,
        }
    }
}

impl fmt::Display for WriteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action())
    }
}

/// What happened to a mirrored write
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PushOutcome {
    /// The endpoint answered with a success status
    Delivered { status: u16 },
    /// The endpoint answered, but not with a success status
    Rejected { status: u16 },
    /// No response (connection, timeout, serialization)
    Failed { reason: String },
    /// No endpoint configured
    Disabled,
    /// The write was never attempted (no async runtime available)
    Skipped,
    /// A newer write of the same collection was sent first
    Superseded,
}

impl PushOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, PushOutcome::Delivered { .. })
    }
}

/// Remote endpoint abstraction
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// True when an endpoint URL is configured
    fn is_enabled(&self) -> bool;

    /// The endpoint currently in use
    fn active_url(&self) -> Option<String>;

    /// Replace the endpoint at runtime; `None` disables the remote
    fn set_endpoint(&self, url: Option<String>) -> PtResult<()>;

    /// Read a collection; `None` on any failure or when disabled
    async fn fetch(&self, resource: Resource) -> Option<Value>;

    /// Write a full collection
    async fn push(&self, action: WriteAction, data: Value) -> PushOutcome;
}

/// Parse an endpoint URL. Blank input means "no endpoint".
pub fn parse_endpoint(raw: &str) -> PtResult<Option<Url>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let url = Url::parse(raw)
        .map_err(|e| PtError::invalid(format!("Remote URL is not valid: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(Some(url)),
        other => Err(PtError::invalid(format!(
            "Remote URL must use http or https, got {other}"
        ))),
    }
}
