// ABOUTME: Host key-value store — named string slots backing the session record.
// ABOUTME: File backend writes atomically via tmp + rename; memory backend supports a byte quota.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// A store of named string values, the only persistence the session layer needs.
pub trait KeyValueStore {
    /// Read the value under `key`, or `None` if the slot is empty.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(Some(content))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, value)?;
        std::fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

/// In-process store, optionally rejecting writes larger than a quota.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects any single value longer than `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            values: HashMap::new(),
            quota: Some(quota),
        }
    }

    /// Write a raw value, bypassing the quota (for seeding corrupt or legacy data).
    pub fn insert_raw(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if let Some(quota) = self.quota {
            if value.len() > quota {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    size: value.len(),
                    quota,
                });
            }
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_missing_key_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::new(tmp.path().join("data"));
        assert!(store.get("nothing").unwrap().is_none());
    }

    #[test]
    fn file_store_set_then_get() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(tmp.path().join("nested").join("data"));
        store.set("slot", "{\"a\":1}").unwrap();
        assert_eq!(store.get("slot").unwrap().as_deref(), Some("{\"a\":1}"));

        store.set("slot", "{}").unwrap();
        assert_eq!(store.get("slot").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn file_store_write_is_atomic() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(tmp.path());
        store.set("slot", "value").unwrap();

        let path = store.path_for("slot");
        assert!(path.exists());
        assert!(
            !path.with_extension("json.tmp").exists(),
            "tmp file should be renamed away after a successful write"
        );
    }

    #[test]
    fn memory_store_quota_rejects_large_values() {
        let mut store = MemoryStore::with_quota(4);
        store.set("k", "1234").unwrap();
        let err = store.set("k", "12345").unwrap_err();
        match err {
            StoreError::QuotaExceeded { key, size, quota } => {
                assert_eq!(key, "k");
                assert_eq!(size, 5);
                assert_eq!(quota, 4);
            }
            other => panic!("expected QuotaExceeded, got {:?}", other),
        }
        // The earlier value survives the rejected write.
        assert_eq!(store.get("k").unwrap().as_deref(), Some("1234"));
    }
}
