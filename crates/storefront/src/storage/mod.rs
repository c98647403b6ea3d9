//! Durable client-side key-value storage.
//!
//! Collections are mirrored to a string key-value store with
//! `localStorage` semantics: one JSON document per key, synchronous reads
//! and writes, and no transactions. Backends:
//!
//! - [`FileStorage`] - one file per key under a state directory
//! - [`MemoryStorage`] - process-local map, shared between clones
//! - [`UnavailableStorage`] - every call fails, as in a context with no
//!   durable storage at all
//!
//! Callers that must never fail go through [`SafeStorage`], which turns
//! every backend error into a logged "no value" or "not written".

mod file;
mod safe;

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::config::{StorageBackend, StorefrontConfig};

pub use file::FileStorage;
pub use safe::{SafeParse, SafeStorage, safe_json_parse};

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No durable storage exists in this context.
    #[error("storage is unavailable")]
    Unavailable,

    /// The value does not fit in the per-key quota.
    #[error("quota exceeded for {key}: {size} bytes (limit {limit})")]
    QuotaExceeded {
        key: String,
        size: usize,
        limit: usize,
    },

    /// The key cannot be mapped onto the backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Filesystem operation failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A lock guarding in-memory storage was poisoned.
    #[error("storage lock poisoned")]
    Lock,
}

/// A string key-value store.
pub trait Storage: Send + Sync + fmt::Debug {
    /// Read the value under `key`, or `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects or cannot persist the value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Open the backend selected by configuration.
///
/// # Errors
///
/// Returns an error if the file backend's state directory cannot be created.
pub fn open(config: &StorefrontConfig) -> Result<Arc<dyn Storage>, StorageError> {
    let storage: Arc<dyn Storage> = match config.storage {
        StorageBackend::File => Arc::new(FileStorage::open(
            &config.state_dir,
            config.storage_quota_bytes,
        )?),
        StorageBackend::Memory => {
            Arc::new(MemoryStorage::with_quota(config.storage_quota_bytes))
        }
        StorageBackend::Disabled => Arc::new(UnavailableStorage),
    };

    tracing::debug!(backend = ?config.storage, "Storage opened");
    Ok(storage)
}

// =============================================================================
// In-memory backend
// =============================================================================

/// In-memory storage. Clones share the same map.
///
/// Tracks how many writes each key received, which lets tests observe
/// write coalescing.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    entries: HashMap<String, String>,
    writes: HashMap<String, usize>,
    quota: Option<usize>,
}

impl MemoryStorage {
    /// Create an empty store with no quota.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that rejects values larger than `quota` bytes.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryInner {
                quota: Some(quota),
                ..MemoryInner::default()
            })),
        }
    }

    /// Number of successful `set_item` calls for `key`.
    #[must_use]
    pub fn write_count(&self, key: &str) -> usize {
        self.inner
            .lock()
            .map(|inner| inner.writes.get(key).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemoryInner>, StorageError> {
        self.inner.lock().map_err(|_| StorageError::Lock)
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.entries.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut inner = self.lock()?;
        if let Some(limit) = inner.quota.filter(|&limit| value.len() > limit) {
            return Err(StorageError::QuotaExceeded {
                key: key.to_owned(),
                size: value.len(),
                limit,
            });
        }

        inner.entries.insert(key.to_owned(), value.to_owned());
        *inner.writes.entry(key.to_owned()).or_insert(0) += 1;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.lock()?.entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// Unavailable backend
// =============================================================================

/// Storage for contexts without durable storage. Every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStorage;

impl Storage for UnavailableStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k").unwrap(), None);

        storage.set_item("k", "[1]").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("[1]"));
        assert_eq!(storage.write_count("k"), 1);

        storage.remove_item("k").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), None);
        storage.remove_item("k").unwrap();
    }

    #[test]
    fn test_memory_storage_clones_share_entries() {
        let storage = MemoryStorage::new();
        let clone = storage.clone();
        clone.set_item("k", "v").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
        assert_eq!(storage.write_count("k"), 1);
    }

    #[test]
    fn test_memory_storage_quota() {
        let storage = MemoryStorage::with_quota(4);
        storage.set_item("k", "1234").unwrap();

        let err = storage.set_item("k", "12345").unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded {
                size: 5,
                limit: 4,
                ..
            }
        ));
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("1234"));
        assert_eq!(storage.write_count("k"), 1);
    }

    #[test]
    fn test_unavailable_storage_always_fails() {
        let storage = UnavailableStorage;
        assert!(matches!(
            storage.get_item("k"),
            Err(StorageError::Unavailable)
        ));
        assert!(matches!(
            storage.set_item("k", "v"),
            Err(StorageError::Unavailable)
        ));
        assert!(matches!(
            storage.remove_item("k"),
            Err(StorageError::Unavailable)
        ));
    }

    #[test]
    fn test_open_selects_backend() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorefrontConfig {
            storage: StorageBackend::File,
            state_dir: dir.path().join("state"),
            ..StorefrontConfig::default()
        };
        let storage = open(&config).unwrap();
        storage.set_item("k", "v").unwrap();
        assert!(dir.path().join("state").join("k.json").exists());

        let config = StorefrontConfig {
            storage: StorageBackend::Disabled,
            ..StorefrontConfig::default()
        };
        assert!(open(&config).unwrap().get_item("k").is_err());
    }
}
