//! Activity log model
//!
//! Append-only audit trail, newest first, capped at `ActivityLog::CAPACITY`.

use chrono::{DateTime, Utc};
use pt_core::traits::Identifiable;
use pt_core::types::RecordId;
use serde::{Deserialize, Serialize};

use crate::user::User;

/// Action names recorded in the log
pub mod actions {
    pub const ADD_PLAN: &str = "ADD_PLAN";
    pub const ADD_ACTUAL: &str = "ADD_ACTUAL";
    pub const EDIT_RECORD: &str = "EDIT_RECORD";
    pub const DELETE_RECORD: &str = "DELETE_RECORD";
    pub const ADD_USER: &str = "ADD_USER";
    pub const DELETE_USER: &str = "DELETE_USER";
    pub const CHANGE_PASSWORD: &str = "CHANGE_PASSWORD";
    pub const ADD_OFF_DAY: &str = "ADD_OFF_DAY";
    pub const REMOVE_OFF_DAY: &str = "REMOVE_OFF_DAY";
    pub const LOGIN: &str = "LOGIN";
    pub const LOGOUT: &str = "LOGOUT";
    pub const SYNC: &str = "SYNC";
    pub const SET_REMOTE: &str = "SET_REMOTE";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: RecordId,
    pub user_id: RecordId,
    pub user_name: String,
    pub action: String,
    pub details: String,
    pub timestamp: DateTime<Utc>,
}

impl ActivityLog {
    /// Most recent entries kept; older ones are evicted
    pub const CAPACITY: usize = 1000;
}

impl Identifiable for ActivityLog {
    fn record_id(&self) -> &RecordId {
        &self.id
    }
}

/// Log entry before the store assigns its id and timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct NewActivityLog {
    pub user_id: RecordId,
    pub user_name: String,
    pub action: String,
    pub details: String,
}

impl NewActivityLog {
    pub fn by(user: &User, action: &str, details: impl Into<String>) -> Self {
        Self {
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            action: action.to_string(),
            details: details.into(),
        }
    }

    pub fn stamp(self) -> ActivityLog {
        ActivityLog {
            id: RecordId::generate(),
            user_id: self.user_id,
            user_name: self.user_name,
            action: self.action,
            details: self.details,
            timestamp: Utc::now(),
        }
    }
}
