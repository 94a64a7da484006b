//! SnapshotManager - full-copy catalog versioning with safe restore.
//!
//! The catalog is shared mutable state edited by multiple teachers, so no
//! prior version may ever be lost silently. Snapshots are immutable
//! full copies of the catalog, stored as indexed records in a single
//! `catalog_snapshots` collection, one document per snapshot, keyed by the
//! externally visible collection name (`words_backup_<timestamp>`, or
//! `words_backup_before_restore_<timestamp>` for restore-triggered safety
//! copies). Listing therefore never scans physical collections.
//!
//! The central correctness property is preserve-over-seed: default content
//! is only inserted into a catalog with zero existing entries, never merged
//! into or overwriting a non-empty one, even on a degraded startup.
//!
//! ## Example
//!
//! ```ignore
//! use word_weaver::{InMemoryDocumentStore, SnapshotManager};
//!
//! let manager = SnapshotManager::new(InMemoryDocumentStore::new());
//! manager.run_startup(); // backup existing, seed only if empty
//!
//! let descriptor = manager.create_snapshot(&teacher)?;
//! let report = manager.restore_snapshot(&teacher, &descriptor.collection_name)?;
//! ```

mod manager;
pub mod naming;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::WordCard;
use crate::identity::AuthError;
use crate::store::{Document, StoreError};

/// Collection holding one document per snapshot.
pub const SNAPSHOTS: &str = "catalog_snapshots";

/// Why a snapshot is being taken. Manual snapshots of an empty catalog are
/// an error; the other triggers silently skip instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotTrigger {
    Startup,
    Manual,
    PreRestore,
}

/// An immutable full copy of the catalog at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub collection_name: String,
    pub timestamp_key: String,
    pub words: Vec<WordCard>,
}

impl Document for CatalogSnapshot {
    fn id(&self) -> &str {
        &self.collection_name
    }
}

/// Snapshot metadata exposed to the HTTP layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotDescriptor {
    pub collection_name: String,
    pub timestamp_key: String,
    pub readable_time: String,
    pub word_count: usize,
}

/// Outcome of a completed restore.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestoreReport {
    pub restored_from: String,
    pub word_count: usize,
    /// Name of the safety snapshot taken before the catalog was replaced,
    /// absent when the catalog was empty at restore time.
    pub pre_restore_snapshot: Option<String>,
}

/// Outcome of the best-effort startup pass.
#[derive(Debug, Clone, PartialEq)]
pub struct StartupReport {
    pub snapshot: Option<SnapshotDescriptor>,
    pub seeded: usize,
    pub preserved: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    Unauthorized(AuthError),
    /// Manual snapshot requested while the catalog has zero entries.
    EmptyCatalog,
    /// The named collection does not follow the snapshot naming convention
    /// or no snapshot by that name exists.
    SnapshotNotFound(String),
    /// The target snapshot contains zero words; restoring it would wipe the
    /// catalog, so nothing was changed.
    EmptySnapshot(String),
    Store(StoreError),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Unauthorized(e) => write!(f, "{}", e),
            SnapshotError::EmptyCatalog => write!(f, "catalog is empty, nothing to snapshot"),
            SnapshotError::SnapshotNotFound(name) => write!(f, "snapshot not found: {}", name),
            SnapshotError::EmptySnapshot(name) => {
                write!(f, "snapshot {} contains no words", name)
            }
            SnapshotError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SnapshotError {}

impl From<AuthError> for SnapshotError {
    fn from(err: AuthError) -> Self {
        SnapshotError::Unauthorized(err)
    }
}

impl From<StoreError> for SnapshotError {
    fn from(err: StoreError) -> Self {
        SnapshotError::Store(err)
    }
}

pub use manager::SnapshotManager;
