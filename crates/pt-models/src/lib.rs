//! # pt-models
//!
//! Domain models for prodtrack.
//!
//! Every collection the record store owns is defined here, along with the
//! role/permission table and the first-start seed data. Field names
//! serialize in camelCase so cached and mirrored JSON matches the remote
//! sheet's column names.

pub use pt_core::traits::{Dated, Identifiable};
pub use pt_core::types::RecordId;

pub mod activity_log;
pub mod cells;
pub mod off_day;
pub mod production_entry;
pub mod seed;
pub mod user;

pub use activity_log::{actions, ActivityLog, NewActivityLog};
pub use off_day::OffDay;
pub use production_entry::{EntryMode, ProductionEntry};
pub use user::{NewUser, Permission, PublicUser, Role, User};
