//! Durable client-side key-value storage.
//!
//! The stores persist small JSON records (session, cart) that must survive
//! process restarts, the way a browser storefront leans on localStorage.
//! The contract matches localStorage deliberately: operations are
//! synchronous and infallible at the trait level - implementations log I/O
//! problems and carry on, and a missing or corrupt record simply reads back
//! as absent.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::warn;

/// Storage keys used by the stores.
pub mod keys {
    /// Key for the persisted session record (profile + token).
    pub const SESSION: &str = "session";

    /// Key for the persisted cart line list.
    pub const CART: &str = "cart";

    /// Key for the most recently placed order (shown on the success view).
    pub const LAST_ORDER: &str = "last-order";
}

/// Durable key-value storage, localStorage-shaped.
pub trait KeyValueStore: Send + Sync {
    /// Read a value; absent and unreadable records are both `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn put(&self, key: &str, value: &str);

    /// Delete a value. Deleting an absent key is a no-op.
    fn remove(&self, key: &str);
}

// =============================================================================
// FileStore
// =============================================================================

/// File-backed storage: one file per key under a data directory.
///
/// Writes go to a temporary file first and are renamed into place, so a
/// crash mid-write leaves the previous record intact rather than a
/// truncated one.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if let Err(e) = std::fs::create_dir_all(&dir) {
            warn!(dir = %dir.display(), error = %e, "failed to create storage directory");
        }
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(key = %key, error = %e, "failed to read storage record");
                None
            }
        }
    }

    fn put(&self, key: &str, value: &str) {
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));

        let result = std::fs::write(&tmp, value).and_then(|()| std::fs::rename(&tmp, &path));
        if let Err(e) = result {
            warn!(key = %key, error = %e, "failed to write storage record");
        }
    }

    fn remove(&self, key: &str) {
        let path = self.path_for(key);
        if let Err(e) = std::fs::remove_file(&path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            warn!(key = %key, error = %e, "failed to remove storage record");
        }
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory storage for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map
            .lock()
            .map(|map| map.get(key).cloned())
            .unwrap_or_default()
    }

    fn put(&self, key: &str, value: &str) {
        if let Ok(mut map) = self.map.lock() {
            map.insert(key.to_owned(), value.to_owned());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut map) = self.map.lock() {
            map.remove(key);
        }
    }
}
