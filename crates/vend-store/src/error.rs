//! # Store Error Types
//!
//! Persistence failures for vend-store.
//!
//! ## Design Principles
//! These errors are deliberately boring: per the persistence policy the
//! ledger logs them and carries on, keeping the in-memory state
//! authoritative for the running session. Nothing above the ledger ever
//! sees a `StoreError` on a mutation path.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Store Error
// =============================================================================

/// Persistence provider failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing medium failed.
    #[error("stock store I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The persisted snapshot exists but is not a valid id → stock mapping.
    ///
    /// Treated as "no snapshot": the ledger keeps its defaults and reseeds
    /// the store, matching a fresh install.
    #[error("stock snapshot at {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;
