//! # Durable Client Storage
//!
//! A string key-value store, the shape of browser `localStorage`.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  KeyValueStore                                                          │
//! │  ├── MemoryStore  HashMap behind a Mutex. Lost at process exit.         │
//! │  └── FileStore    <data_dir>/<key>.json                                 │
//! │                                                                         │
//! │  FileStore write path:                                                  │
//! │     value ──► <key>.json.tmp ──fsync──► rename ──► <key>.json           │
//! │                                                                         │
//! │  A crash mid-write leaves either the old file or the new one, never a   │
//! │  half-written cart.                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Synchronous string key-value storage.
///
/// Methods take `&self`; implementations handle their own locking.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` if the key was never set.
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Deletes `key`. Deleting a missing key is not an error.
    fn remove_item(&self, key: &str) -> StoreResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        (**self).remove_item(key)
    }
}

// =============================================================================
// Memory Store
// =============================================================================

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_items<R>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> R) -> StoreResult<R> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))?;
        Ok(f(&mut items))
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        self.with_items(|items| items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        self.with_items(|items| {
            items.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        self.with_items(|items| {
            items.remove(key);
        })
    }
}

// =============================================================================
// File Store
// =============================================================================

/// One file per key under a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;
        debug!(dir = %dir.display(), "Opened file store");
        Ok(FileStore { dir })
    }

    /// Opens the store in the platform's per-user data directory.
    ///
    /// | Platform | Location |
    /// |----------|----------|
    /// | Linux | `~/.local/share/storefront` |
    /// | macOS | `~/Library/Application Support/com.storefront.storefront` |
    /// | Windows | `%APPDATA%\storefront\storefront\data` |
    pub fn open_default() -> StoreResult<Self> {
        Self::open(default_data_dir()?)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        let mut file = fs::File::create(&tmp).map_err(|e| StoreError::io(&tmp, e))?;
        file.write_all(value.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| StoreError::io(&path, e))?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }
}

/// Platform data directory for the storefront client.
pub fn default_data_dir() -> StoreResult<PathBuf> {
    ProjectDirs::from("com", "storefront", "storefront")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(StoreError::NoDataDir)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(store: &dyn KeyValueStore) {
        assert_eq!(store.get_item("cart").unwrap(), None);

        store.set_item("cart", "[]").unwrap();
        assert_eq!(store.get_item("cart").unwrap().as_deref(), Some("[]"));

        store.set_item("cart", r#"[{"a":1}]"#).unwrap();
        assert_eq!(store.get_item("cart").unwrap().as_deref(), Some(r#"[{"a":1}]"#));

        store.remove_item("cart").unwrap();
        assert_eq!(store.get_item("cart").unwrap(), None);
        store.remove_item("cart").unwrap();
    }

    #[test]
    fn test_memory_store() {
        exercise(&MemoryStore::new());
    }

    #[test]
    fn test_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("nested")).unwrap();
        exercise(&store);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        FileStore::open(dir.path())
            .unwrap()
            .set_item("cart", "[1]")
            .unwrap();

        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get_item("cart").unwrap().as_deref(), Some("[1]"));
        assert!(!dir.path().join("cart.json.tmp").exists());
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        for key in ["", "../cart", "a/b", ".hidden"] {
            assert!(
                matches!(store.set_item(key, "x"), Err(StoreError::InvalidKey(_))),
                "{key}"
            );
        }
    }
}
