//! Namespaced module storage
//!
//! All modules share one key/value backend. Each module sees it through a
//! [`ScopedStorage`] that prefixes every key with
//! `"<namespace>:module:<module id>:"`, so two modules using the same logical
//! key never collide and `clear()` only touches the caller's keys.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to serialize value for key '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode storage file {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write storage file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Flat string-to-string store shared by every module
pub trait StorageBackend: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: String) -> StorageResult<()>;
    fn remove_item(&self, key: &str) -> StorageResult<()>;

    /// Remove several keys as one mutation
    fn remove_items(&self, keys: &[String]) -> StorageResult<()> {
        for key in keys {
            self.remove_item(key)?;
        }
        Ok(())
    }

    /// Every stored key, in ascending order
    fn keys(&self) -> Vec<String>;
}

fn lock(entries: &Mutex<BTreeMap<String, String>>) -> MutexGuard<'_, BTreeMap<String, String>> {
    entries.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Non-persistent backend
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set_item(&self, key: &str, value: String) -> StorageResult<()> {
        lock(&self.entries).insert(key.to_string(), value);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        lock(&self.entries).remove(key);
        Ok(())
    }

    fn remove_items(&self, keys: &[String]) -> StorageResult<()> {
        let mut entries = lock(&self.entries);
        for key in keys {
            entries.remove(key);
        }
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        lock(&self.entries).keys().cloned().collect()
    }
}

/// Backend persisted as a single JSON object
///
/// The file is loaded once on open and rewritten after every mutation.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStorage {
    /// Open the store at `path`
    ///
    /// A missing file starts empty. An unreadable or corrupt file also starts
    /// empty and is overwritten on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Self::load(&path);
        log::debug!(
            "Opened storage {} with {} entries",
            path.display(),
            entries.len()
        );
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> BTreeMap<String, String> {
        if !path.exists() {
            return BTreeMap::new();
        }
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                log::warn!("Cannot read storage file {}: {}", path.display(), e);
                return BTreeMap::new();
            }
        };
        match serde_json::from_str(&contents) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!(
                    "Ignoring corrupt storage file {}: {}",
                    path.display(),
                    e
                );
                BTreeMap::new()
            }
        }
    }

    /// Apply `change` to a copy, persist it, and only then make it visible
    ///
    /// `change` returns false when nothing changed and no write is needed.
    fn update(
        &self,
        change: impl FnOnce(&mut BTreeMap<String, String>) -> bool,
    ) -> StorageResult<()> {
        let mut entries = lock(&self.entries);
        let mut candidate = entries.clone();
        if !change(&mut candidate) {
            return Ok(());
        }
        self.persist(&candidate)?;
        *entries = candidate;
        Ok(())
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        let contents =
            serde_json::to_string_pretty(entries).map_err(|source| StorageError::Encode {
                path: self.path.clone(),
                source,
            })?;
        fs::write(&self.path, contents).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl StorageBackend for JsonFileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set_item(&self, key: &str, value: String) -> StorageResult<()> {
        self.update(|candidate| {
            candidate.insert(key.to_string(), value);
            true
        })
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.update(|candidate| candidate.remove(key).is_some())
    }

    fn remove_items(&self, keys: &[String]) -> StorageResult<()> {
        self.update(|candidate| {
            let before = candidate.len();
            candidate.retain(|key, _| !keys.contains(key));
            candidate.len() != before
        })
    }

    fn keys(&self) -> Vec<String> {
        lock(&self.entries).keys().cloned().collect()
    }
}

/// Escape a module id for use as one prefix segment
fn escape_segment(segment: &str) -> String {
    segment.replace('%', "%25").replace(':', "%3A")
}

/// Key prefix owned by `module_id` under `namespace`
pub fn storage_prefix(namespace: &str, module_id: &str) -> String {
    format!("{}:module:{}:", namespace, escape_segment(module_id))
}

/// One module's view of the shared backend
#[derive(Clone)]
pub struct ScopedStorage {
    prefix: String,
    backend: Arc<dyn StorageBackend>,
}

impl std::fmt::Debug for ScopedStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedStorage")
            .field("prefix", &self.prefix)
            .finish()
    }
}

impl ScopedStorage {
    pub fn new(backend: Arc<dyn StorageBackend>, namespace: &str, module_id: &str) -> Self {
        Self {
            prefix: storage_prefix(namespace, module_id),
            backend,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// Read and deserialize `key`
    ///
    /// Missing keys and values that fail to deserialize both read as `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let full_key = self.full_key(key);
        let raw = self.backend.get_item(&full_key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::debug!("Treating unreadable value at \"{}\" as absent: {}", full_key, e);
                None
            }
        }
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StorageResult<()> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.backend.set_item(&self.full_key(key), raw)
    }

    pub fn remove(&self, key: &str) -> StorageResult<()> {
        self.backend.remove_item(&self.full_key(key))
    }

    /// Logical keys owned by this module
    pub fn keys(&self) -> Vec<String> {
        self.backend
            .keys()
            .into_iter()
            .filter_map(|key| key.strip_prefix(&self.prefix).map(str::to_string))
            .collect()
    }

    /// Remove every key owned by this module, leaving other modules' keys alone
    pub fn clear(&self) -> StorageResult<()> {
        let owned: Vec<String> = self
            .backend
            .keys()
            .into_iter()
            .filter(|key| key.starts_with(&self.prefix))
            .collect();
        if owned.is_empty() {
            return Ok(());
        }
        self.backend.remove_items(&owned)
    }
}
