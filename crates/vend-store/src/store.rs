//! # Stock Stores
//!
//! The persistence provider abstraction and its two implementations.
//!
//! ## Provider Contract
//! A store is a dumb key-value medium for exactly one value: the full
//! stock snapshot (slot code → count). `read_all` answers "what was
//! persisted, if anything"; `write_all` replaces the whole snapshot.
//! Partial updates do not exist - every successful mutation persists the
//! complete mapping, so a crash immediately after a mutation never loses it.
//!
//! ## Implementations
//! - [`JsonFileStore`] - production: one JSON file per namespace
//! - [`MemoryStore`] - tests and ephemeral sessions

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Snapshot Type
// =============================================================================

/// A full point-in-time mapping of slot code → stock count.
///
/// `BTreeMap` keeps the serialized form stable (sorted keys), so writing
/// a snapshot and reading it back reproduces the same bytes.
pub type StockSnapshot = BTreeMap<String, i64>;

// =============================================================================
// Provider Trait
// =============================================================================

/// Durable storage for the stock snapshot.
///
/// `Send + Sync` so a future multi-session variant can share one store
/// behind a lock; the current machine is single-threaded and never relies
/// on it.
pub trait StockStore: Send + Sync {
    /// Reads the persisted snapshot. `Ok(None)` means nothing was ever
    /// persisted (fresh install); an error means the medium failed or the
    /// payload is malformed.
    fn read_all(&self) -> StoreResult<Option<StockSnapshot>>;

    /// Replaces the persisted snapshot with `snapshot`.
    fn write_all(&self, snapshot: &StockSnapshot) -> StoreResult<()>;
}

// =============================================================================
// Store Configuration
// =============================================================================

/// Where and under which namespace the stock file lives.
///
/// The persisted footprint is `<dir>/<namespace>-stock.json`. A theme
/// preference persisted by the presentation layer uses the same
/// `<namespace>-` prefix but is not owned by this crate.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Key prefix for the persisted footprint.
    pub namespace: String,

    /// Directory the stock file is written into.
    pub dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            namespace: "vinyl-vend".to_string(),
            dir: PathBuf::from("data"),
        }
    }
}

impl StoreConfig {
    /// Full path of the stock snapshot file.
    pub fn stock_path(&self) -> PathBuf {
        self.dir.join(format!("{}-stock.json", self.namespace))
    }
}

// =============================================================================
// JSON File Store
// =============================================================================

/// Stock store backed by a single JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store from a configuration.
    pub fn new(config: &StoreConfig) -> Self {
        JsonFileStore {
            path: config.stock_path(),
        }
    }

    /// Creates a store writing to an explicit file path.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StockStore for JsonFileStore {
    fn read_all(&self) -> StoreResult<Option<StockSnapshot>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let snapshot = serde_json::from_str(&raw).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })?;

        Ok(Some(snapshot))
    }

    fn write_all(&self, snapshot: &StockSnapshot) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let json = serde_json::to_string_pretty(snapshot).map_err(|source| {
            StoreError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;

        fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// Stock store holding its snapshot in memory.
///
/// Used by tests and as a stub when no durable medium is wanted. Interior
/// mutability via `Mutex` keeps the trait object shareable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Option<StockSnapshot>>,
}

impl MemoryStore {
    /// Creates an empty store (no persisted snapshot yet).
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Creates a store pre-populated with a snapshot, as if a previous
    /// session had persisted it.
    pub fn with_snapshot(snapshot: StockSnapshot) -> Self {
        MemoryStore {
            inner: Mutex::new(Some(snapshot)),
        }
    }
}

impl StockStore for MemoryStore {
    fn read_all(&self) -> StoreResult<Option<StockSnapshot>> {
        let guard = self.inner.lock().expect("memory store mutex poisoned");
        Ok(guard.clone())
    }

    fn write_all(&self, snapshot: &StockSnapshot) -> StoreResult<()> {
        let mut guard = self.inner.lock().expect("memory store mutex poisoned");
        *guard = Some(snapshot.clone());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(tag: &str) -> (PathBuf, JsonFileStore) {
        let dir = std::env::temp_dir().join(format!(
            "vend-store-{}-{}",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        let config = StoreConfig {
            namespace: "vinyl-vend".to_string(),
            dir: dir.clone(),
        };
        (dir, JsonFileStore::new(&config))
    }

    fn sample_snapshot() -> StockSnapshot {
        let mut snapshot = StockSnapshot::new();
        snapshot.insert("A1".to_string(), 3);
        snapshot.insert("A2".to_string(), 0);
        snapshot.insert("B1".to_string(), 12);
        snapshot
    }

    #[test]
    fn test_config_derives_namespaced_path() {
        let config = StoreConfig::default();
        assert!(config
            .stock_path()
            .ends_with("vinyl-vend-stock.json"));
    }

    #[test]
    fn test_missing_file_reads_as_none() {
        let (dir, store) = temp_store("missing");
        assert!(store.read_all().unwrap().is_none());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_file_round_trip() {
        let (dir, store) = temp_store("roundtrip");
        let snapshot = sample_snapshot();

        store.write_all(&snapshot).unwrap();
        let loaded = store.read_all().unwrap().unwrap();
        assert_eq!(loaded, snapshot);

        // Writing what was read reproduces the same bytes (sorted keys)
        store.write_all(&loaded).unwrap();
        let first = fs::read_to_string(store.path()).unwrap();
        store.write_all(&store.read_all().unwrap().unwrap()).unwrap();
        let second = fs::read_to_string(store.path()).unwrap();
        assert_eq!(first, second);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_malformed_file_is_reported() {
        let (dir, store) = temp_store("malformed");
        fs::create_dir_all(&dir).unwrap();
        fs::write(store.path(), "not json at all").unwrap();

        let err = store.read_all().unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.read_all().unwrap().is_none());

        let snapshot = sample_snapshot();
        store.write_all(&snapshot).unwrap();
        assert_eq!(store.read_all().unwrap().unwrap(), snapshot);
    }
}
