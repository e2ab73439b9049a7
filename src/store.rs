//! Key-value stores holding serialized JSON strings.
//!
//! [`Storage`](crate::storage::Storage) reads and writes whole values through
//! this trait, so the backing can be a directory on disk or a map in memory.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::{fs, io};

use tracing::debug;

/// Synchronous get/set of string values by key.
pub trait KvStore {
    /// Returns the value stored under `key`, or `None` if nothing is.
    fn load(&self, key: &str) -> io::Result<Option<String>>;

    /// Replaces the value stored under `key`.
    fn save(&self, key: &str, value: &str) -> io::Result<()>;
}

/// One file per key in a directory: `<root>/<key>.json`.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KvStore for FileStore {
    fn load(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&self, key: &str, value: &str) -> io::Result<()> {
        // Replace atomically: write a sibling file, then rename over the target.
        let path = self.path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        debug!(key, bytes = value.len(), "saved");
        Ok(())
    }
}

/// In-memory store, for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn load(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> io::Result<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn file_store_missing_key_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("data")).unwrap();

        assert_eq!(store.load("absent").unwrap(), None);
    }

    #[test]
    fn file_store_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        store.save("k", "[1,2]").unwrap();
        store.save("k", "[3]").unwrap();

        assert_eq!(store.load("k").unwrap().as_deref(), Some("[3]"));
        assert!(dir.path().join("k.json").is_file());
        assert!(!dir.path().join("k.json.tmp").exists());
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = TempDir::new().unwrap();
        FileStore::new(dir.path()).unwrap().save("k", "v").unwrap();

        let reopened = FileStore::new(dir.path()).unwrap();
        assert_eq!(reopened.load("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn memory_store_save_then_load() {
        let store = MemoryStore::new();
        assert_eq!(store.load("k").unwrap(), None);

        store.save("k", "v").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some("v"));
    }
}
