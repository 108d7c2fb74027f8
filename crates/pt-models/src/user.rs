//! User model and role permissions
//!
//! Passwords are stored in plaintext so the remote sheet can round-trip
//! them unchanged.

use pt_core::traits::Identifiable;
use pt_core::types::RecordId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Planner,
    #[default]
    Operator,
}

/// Actions gated by role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewDashboard,
    AddPlan,
    AddActual,
    EditEntry,
    DeleteEntry,
    ExportReport,
    ManageOffDays,
    ManageUsers,
    ViewLogs,
    Sync,
    ConfigureRemote,
}

impl Permission {
    pub fn name(&self) -> &'static str {
        match self {
            Permission::ViewDashboard => "view_dashboard",
            Permission::AddPlan => "add_plan",
            Permission::AddActual => "add_actual",
            Permission::EditEntry => "edit_entry",
            Permission::DeleteEntry => "delete_entry",
            Permission::ExportReport => "export_report",
            Permission::ManageOffDays => "manage_off_days",
            Permission::ManageUsers => "manage_users",
            Permission::ViewLogs => "view_logs",
            Permission::Sync => "sync",
            Permission::ConfigureRemote => "configure_remote",
        }
    }
}

impl Role {
    /// Permissions granted to this role
    pub fn permissions(&self) -> &'static [Permission] {
        use Permission::*;
        match self {
            Role::Admin => &[
                ViewDashboard,
                AddPlan,
                AddActual,
                EditEntry,
                DeleteEntry,
                ExportReport,
                ManageOffDays,
                ManageUsers,
                ViewLogs,
                Sync,
                ConfigureRemote,
            ],
            Role::Manager => &[
                ViewDashboard,
                AddPlan,
                AddActual,
                EditEntry,
                DeleteEntry,
                ExportReport,
                ManageOffDays,
                ViewLogs,
                Sync,
            ],
            Role::Planner => &[ViewDashboard, AddPlan, EditEntry, ExportReport, Sync],
            Role::Operator => &[ViewDashboard, AddActual, Sync],
        }
    }

    pub fn allows(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Planner => "planner",
            Role::Operator => "operator",
        }
    }
}

/// User account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub name: String,
    /// Login name, unique case-insensitively
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub role: Role,
    pub password: String,
}

impl User {
    pub fn can(&self, permission: Permission) -> bool {
        self.role.allows(permission)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Case-insensitive username comparison
    pub fn has_username(&self, username: &str) -> bool {
        self.username.to_lowercase() == username.trim().to_lowercase()
    }

    /// View without the password, for API responses
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id.clone(),
            name: self.name.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

impl Identifiable for User {
    fn record_id(&self) -> &RecordId {
        &self.id
    }
}

/// User without credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: RecordId,
    pub name: String,
    pub username: String,
    pub email: String,
    pub role: Role,
}

/// New user creation parameters
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(length(min = 1, max = 255))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[serde(default)]
    pub role: Role,

    #[validate(length(min = 1))]
    pub password: String,
}

impl From<NewUser> for User {
    fn from(new: NewUser) -> Self {
        Self {
            id: RecordId::generate(),
            name: new.name.trim().to_string(),
            username: new.username.trim().to_string(),
            email: new.email.trim().to_string(),
            role: new.role,
            password: new.password,
        }
    }
}
