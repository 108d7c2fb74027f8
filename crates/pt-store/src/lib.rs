//! # pt-store
//!
//! The record store: sole owner of production entries, off-days, users,
//! the activity log and the current session.
//!
//! Collections are persisted as whole JSON documents in a [`KeyValueCache`]
//! and every write of a shared collection is mirrored to the remote
//! endpoint in the background. [`RecordStore::sync`] pulls the remote copy
//! back and overwrites the local one.

pub mod cache;
pub mod events;
pub mod mirror;
pub mod store;
pub mod sync;

pub use cache::{keys, FileCache, KeyValueCache, MemoryCache};
pub use events::{Collection, StoreEvent};
pub use mirror::MirrorHandle;
pub use store::{EntryDeletion, RecordStore, StoreOptions};
pub use sync::{PullOutcome, SyncReport};
