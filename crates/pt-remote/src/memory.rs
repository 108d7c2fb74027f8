//! In-memory remote for development and tests

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use pt_core::error::PtResult;
use serde_json::Value;

use crate::{parse_endpoint, PushOutcome, RemoteStore, Resource, WriteAction};

#[derive(Default)]
struct State {
    endpoint: Option<String>,
    sheets: HashMap<Resource, Value>,
    pushes: Vec<(WriteAction, Value)>,
    fail_fetches: bool,
    fail_pushes: bool,
}

/// A remote that keeps its "sheets" in a map.
///
/// Successful pushes replace the matching resource, so a write followed by
/// a fetch round-trips the way the real endpoint does.
pub struct MemoryRemote {
    state: Mutex<State>,
}

impl Default for MemoryRemote {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRemote {
    pub const URL: &'static str = "http://remote.invalid/exec";

    /// An enabled remote with no data
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                endpoint: Some(Self::URL.to_string()),
                ..State::default()
            }),
        }
    }

    /// A remote with no endpoint configured
    pub fn disabled() -> Self {
        Self {
            state: Mutex::new(State::default()),
        }
    }

    pub fn with_resource(self, resource: Resource, value: Value) -> Self {
        self.set_resource(resource, value);
        self
    }

    pub fn set_resource(&self, resource: Resource, value: Value) {
        self.state.lock().sheets.insert(resource, value);
    }

    pub fn resource(&self, resource: Resource) -> Option<Value> {
        self.state.lock().sheets.get(&resource).cloned()
    }

    pub fn fail_fetches(&self, fail: bool) {
        self.state.lock().fail_fetches = fail;
    }

    pub fn fail_pushes(&self, fail: bool) {
        self.state.lock().fail_pushes = fail;
    }

    /// Every push received, delivered or not
    pub fn pushes(&self) -> Vec<(WriteAction, Value)> {
        self.state.lock().pushes.clone()
    }
}

#[async_trait]
impl RemoteStore for MemoryRemote {
    fn is_enabled(&self) -> bool {
        self.state.lock().endpoint.is_some()
    }

    fn active_url(&self) -> Option<String> {
        self.state.lock().endpoint.clone()
    }

    fn set_endpoint(&self, url: Option<String>) -> PtResult<()> {
        let parsed = match url.as_deref() {
            Some(raw) => parse_endpoint(raw)?,
            None => None,
        };
        self.state.lock().endpoint = parsed.map(|u| u.to_string());
        Ok(())
    }

    async fn fetch(&self, resource: Resource) -> Option<Value> {
        let state = self.state.lock();
        if state.endpoint.is_none() || state.fail_fetches {
            return None;
        }
        state.sheets.get(&resource).cloned()
    }

    async fn push(&self, action: WriteAction, data: Value) -> PushOutcome {
        let mut state = self.state.lock();
        if state.endpoint.is_none() {
            return PushOutcome::Disabled;
        }
        state.pushes.push((action, data.clone()));
        if state.fail_pushes {
            return PushOutcome::Failed {
                reason: "connection refused".to_string(),
            };
        }
        state.sheets.insert(action.resource(), data);
        PushOutcome::Delivered { status: 200 }
    }
}
