//! The record store

use std::sync::Arc;

use chrono::Utc;
use parking_lot::{Mutex, MutexGuard};
use pt_core::config::{AppConfig, OffDaySeed};
use pt_core::error::PtResult;
use pt_core::types::SiteClock;
use pt_models::{seed, ActivityLog, NewActivityLog, OffDay, ProductionEntry, User};
use pt_remote::{PushOutcome, RemoteStore, WriteAction};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::cache::{keys, KeyValueCache};
use crate::events::{Collection, StoreEvent};
use crate::mirror::{MirrorHandle, PushQueue};

const EVENT_CAPACITY: usize = 64;

/// Seeding options
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Off-days written to an empty store
    pub default_off_days: Vec<OffDaySeed>,
    /// Seed a week of demo production instead of an empty list
    pub seed_demo_data: bool,
    pub known_processes: Vec<String>,
    pub known_categories: Vec<String>,
    pub clock: SiteClock,
}

impl StoreOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            default_off_days: config.site.default_off_days.clone(),
            seed_demo_data: config.store.seed_demo_data,
            known_processes: config.site.known_processes.clone(),
            known_categories: config.site.known_categories.clone(),
            clock: config.site.clock(),
        }
    }
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// Result of deleting a production entry
#[derive(Debug)]
pub struct EntryDeletion {
    /// The collection after the delete
    pub remaining: Vec<ProductionEntry>,
    /// The entry that was removed, if any matched
    pub removed: Option<ProductionEntry>,
    pub mirror: MirrorHandle,
}

/// Owner of every persisted collection.
///
/// Read-modify-write operations are serialized on an internal lock;
/// concurrent full-collection saves are last-write-wins. Mirrored pushes of
/// one collection reach the remote in save order.
pub struct RecordStore {
    cache: Arc<dyn KeyValueCache>,
    remote: Arc<dyn RemoteStore>,
    options: StoreOptions,
    write_lock: Mutex<()>,
    pushes: PushQueue,
    events: broadcast::Sender<StoreEvent>,
}

impl RecordStore {
    /// Create the store and seed any collection missing from the cache
    pub fn new(
        cache: Arc<dyn KeyValueCache>,
        remote: Arc<dyn RemoteStore>,
        options: StoreOptions,
    ) -> PtResult<Self> {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let store = Self {
            cache,
            remote,
            options,
            write_lock: Mutex::new(()),
            pushes: PushQueue::default(),
            events,
        };
        store.init()?;
        Ok(store)
    }

    fn init(&self) -> PtResult<()> {
        if self.cache.get(keys::USERS)?.is_none() {
            self.write(keys::USERS, &seed::initial_users())?;
        }
        if self.cache.get(keys::OFF_DAYS)?.is_none() {
            self.write(keys::OFF_DAYS, &seed::initial_off_days(&self.options.default_off_days))?;
        }
        if self.cache.get(keys::PRODUCTION)?.is_none() {
            let entries = if self.options.seed_demo_data {
                seed::demo_production(
                    self.options.clock.today_at(Utc::now()),
                    &self.options.known_processes,
                    &self.options.known_categories,
                )
            } else {
                Vec::new()
            };
            self.write(keys::PRODUCTION, &entries)?;
        }
        if self.cache.get(keys::LOGS)?.is_none() {
            self.write::<ActivityLog>(keys::LOGS, &[])?;
        }

        info!(cache = self.cache.name(), remote = self.remote.is_enabled(), "Record store ready");
        Ok(())
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    pub fn remote(&self) -> &Arc<dyn RemoteStore> {
        &self.remote
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub(crate) fn notify(&self, event: StoreEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock()
    }

    pub(crate) fn read<T: DeserializeOwned>(&self, key: &str) -> PtResult<Vec<T>> {
        let Some(text) = self.cache.get(key)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&text) {
            Ok(values) => Ok(values),
            Err(e) => {
                warn!(key, error = %e, "Corrupt cache entry treated as empty");
                Ok(Vec::new())
            }
        }
    }

    pub(crate) fn write<T: Serialize>(&self, key: &str, values: &[T]) -> PtResult<()> {
        let text = serde_json::to_string(values)?;
        self.cache.set(key, &text)?;
        debug!(key, records = values.len(), "Collection written");
        Ok(())
    }

    fn save_mirrored<T: Serialize>(
        &self,
        key: &str,
        collection: Collection,
        action: WriteAction,
        values: &[T],
    ) -> PtResult<MirrorHandle> {
        self.write(key, values)?;
        self.notify(StoreEvent::Changed { collection });
        let data = serde_json::to_value(values)?;
        Ok(MirrorHandle::spawn(&self.pushes, self.remote.clone(), action, data))
    }

    pub fn entries(&self) -> PtResult<Vec<ProductionEntry>> {
        self.read(keys::PRODUCTION)
    }

    pub fn off_days(&self) -> PtResult<Vec<OffDay>> {
        self.read(keys::OFF_DAYS)
    }

    pub fn users(&self) -> PtResult<Vec<User>> {
        self.read(keys::USERS)
    }

    /// Activity log, newest first
    pub fn logs(&self) -> PtResult<Vec<ActivityLog>> {
        self.read(keys::LOGS)
    }

    /// Overwrite production entries and mirror them to the remote
    pub fn save_entries(&self, entries: &[ProductionEntry]) -> PtResult<MirrorHandle> {
        self.save_mirrored(keys::PRODUCTION, Collection::Entries, WriteAction::SaveProduction, entries)
    }

    pub fn save_off_days(&self, off_days: &[OffDay]) -> PtResult<MirrorHandle> {
        self.save_mirrored(keys::OFF_DAYS, Collection::OffDays, WriteAction::SaveOffDays, off_days)
    }

    pub fn save_users(&self, users: &[User]) -> PtResult<MirrorHandle> {
        self.save_mirrored(keys::USERS, Collection::Users, WriteAction::SaveUsers, users)
    }

    /// Read, modify and save production entries under the write lock.
    ///
    /// The closure must not call back into the store.
    pub fn update_entries<R>(
        &self,
        f: impl FnOnce(&mut Vec<ProductionEntry>) -> PtResult<R>,
    ) -> PtResult<(R, MirrorHandle)> {
        let _guard = self.lock();
        let mut entries = self.entries()?;
        let result = f(&mut entries)?;
        let mirror = self.save_entries(&entries)?;
        Ok((result, mirror))
    }

    /// Same as [`update_entries`](Self::update_entries) for off-days
    pub fn update_off_days<R>(
        &self,
        f: impl FnOnce(&mut Vec<OffDay>) -> PtResult<R>,
    ) -> PtResult<(R, MirrorHandle)> {
        let _guard = self.lock();
        let mut off_days = self.off_days()?;
        let result = f(&mut off_days)?;
        let mirror = self.save_off_days(&off_days)?;
        Ok((result, mirror))
    }

    /// Same as [`update_entries`](Self::update_entries) for users
    pub fn update_users<R>(
        &self,
        f: impl FnOnce(&mut Vec<User>) -> PtResult<R>,
    ) -> PtResult<(R, MirrorHandle)> {
        let _guard = self.lock();
        let mut users = self.users()?;
        let result = f(&mut users)?;
        let mirror = self.save_users(&users)?;
        Ok((result, mirror))
    }

    /// Remove the entry whose id matches `id` by string form.
    ///
    /// When nothing matches the collection is left untouched.
    pub fn delete_entry(&self, id: &str) -> PtResult<EntryDeletion> {
        let _guard = self.lock();
        let mut remaining = self.entries()?;

        let Some(index) = remaining.iter().position(|e| e.id.matches(id)) else {
            return Ok(EntryDeletion {
                remaining,
                removed: None,
                mirror: MirrorHandle::ready(PushOutcome::Skipped),
            });
        };

        let removed = remaining.remove(index);
        let mirror = self.save_entries(&remaining)?;
        Ok(EntryDeletion {
            remaining,
            removed: Some(removed),
            mirror,
        })
    }

    /// Prepend a log entry, evicting the oldest past capacity
    pub fn add_log(&self, entry: NewActivityLog) -> PtResult<ActivityLog> {
        let _guard = self.lock();
        let mut logs: Vec<ActivityLog> = self.logs()?;

        let log = entry.stamp();
        logs.insert(0, log.clone());
        logs.truncate(ActivityLog::CAPACITY);

        self.write(keys::LOGS, &logs)?;
        self.notify(StoreEvent::Changed {
            collection: Collection::Logs,
        });
        Ok(log)
    }

    pub fn session(&self) -> PtResult<Option<User>> {
        let Some(text) = self.cache.get(keys::SESSION)? else {
            return Ok(None);
        };
        match serde_json::from_str(&text) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!(error = %e, "Corrupt session discarded");
                Ok(None)
            }
        }
    }

    pub fn set_session(&self, user: Option<&User>) -> PtResult<()> {
        match user {
            Some(user) => self.cache.set(keys::SESSION, &serde_json::to_string(user)?)?,
            None => self.cache.remove(keys::SESSION)?,
        }
        self.notify(StoreEvent::Changed {
            collection: Collection::Session,
        });
        Ok(())
    }
}
