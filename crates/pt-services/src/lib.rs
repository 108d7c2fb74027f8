//! # pt-services
//!
//! Business operations on top of the record store.
//!
//! Every service is constructed over a borrowed [`RecordStore`] and takes
//! the acting user per call. Each call checks the actor's role permission,
//! validates through a contract, mutates the store and appends an activity
//! log entry, in that order. Nothing is written when a check fails.
//!
//! [`RecordStore`]: pt_store::RecordStore

pub mod base;
pub mod off_days;
pub mod production;
pub mod reports;
pub mod session;
pub mod sync;
pub mod users;

pub use base::authorize;
pub use off_days::OffDayService;
pub use production::{
    generate_batch_no, ActualService, DeleteEntryService, EditEntryService, PlanService,
};
pub use reports::{CsvReport, ReportService};
pub use session::SessionService;
pub use sync::{RemoteStatus, SyncService};
pub use users::UserService;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use pt_core::config::OffDaySeed;
    use pt_models::{seed, NewUser, Role, User};
    use pt_remote::MemoryRemote;
    use pt_store::{MemoryCache, RecordStore, StoreOptions};

    pub fn store() -> RecordStore {
        store_with_remote(Arc::new(MemoryRemote::disabled()))
    }

    pub fn store_with_remote(remote: Arc<MemoryRemote>) -> RecordStore {
        let options = StoreOptions {
            default_off_days: vec![OffDaySeed {
                date: "2025-05-01".into(),
                description: "Labour Day".into(),
            }],
            ..StoreOptions::default()
        };
        RecordStore::new(Arc::new(MemoryCache::new()), remote, options).unwrap()
    }

    pub fn admin() -> User {
        seed::initial_users().remove(0)
    }

    pub fn user_with_role(role: Role) -> User {
        User::from(NewUser {
            name: format!("{} user", role.as_str()),
            username: role.as_str().to_string(),
            email: String::new(),
            role,
            password: "pw".into(),
        })
    }
}
