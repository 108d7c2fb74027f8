//! Key-value cache backends
//!
//! Each logical key holds one JSON document. The store never asks for
//! partial updates, so backends only need whole-value get/set/remove.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use pt_core::error::{PtError, PtResult};
use tracing::debug;

/// Logical cache keys
pub mod keys {
    pub const USERS: &str = "users";
    pub const PRODUCTION: &str = "production-entries";
    pub const OFF_DAYS: &str = "off-days";
    pub const LOGS: &str = "activity-logs";
    pub const SESSION: &str = "current-session";
}

/// Persistent string storage keyed by logical name
pub trait KeyValueCache: Send + Sync {
    fn get(&self, key: &str) -> PtResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> PtResult<()>;

    fn remove(&self, key: &str) -> PtResult<()>;

    /// Backend name for logging
    fn name(&self) -> &str;
}

/// One `<key>.json` file per key under a data directory
pub struct FileCache {
    root: PathBuf,
}

impl FileCache {
    /// Open (and create if needed) the data directory
    pub fn open(root: impl AsRef<Path>) -> PtResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|e| {
            PtError::Storage(format!("cannot create data directory {}: {e}", root.display()))
        })?;
        Ok(Self { root })
    }

    fn resolve_path(&self, key: &str) -> PtResult<PathBuf> {
        if key.is_empty()
            || key.contains("..")
            || key.contains('/')
            || key.contains('\\')
        {
            return Err(PtError::Storage(format!("invalid cache key: {key}")));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueCache for FileCache {
    fn get(&self, key: &str) -> PtResult<Option<String>> {
        let path = self.resolve_path(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PtError::Storage(format!("read {}: {e}", path.display()))),
        }
    }

    fn set(&self, key: &str, value: &str) -> PtResult<()> {
        let path = self.resolve_path(key)?;
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, value)
            .and_then(|_| fs::rename(&tmp, &path))
            .map_err(|e| PtError::Storage(format!("write {}: {e}", path.display())))?;

        debug!(path = ?path, bytes = value.len(), "Cache key written");
        Ok(())
    }

    fn remove(&self, key: &str) -> PtResult<()> {
        let path = self.resolve_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PtError::Storage(format!("remove {}: {e}", path.display()))),
        }
    }

    fn name(&self) -> &str {
        "file"
    }
}

/// Process-local cache
#[derive(Default)]
pub struct MemoryCache {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueCache for MemoryCache {
    fn get(&self, key: &str) -> PtResult<Option<String>> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PtResult<()> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> PtResult<()> {
        self.values.lock().remove(key);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
