//! Snapshot creation, listing, restore, and the startup policy.

use chrono::Utc;
use tracing::{info, warn};

use crate::catalog::{self, WordCard};
use crate::identity::IdentityContext;
use crate::store::{DocumentStore, StoreError};

use super::naming;
use super::{
    CatalogSnapshot, RestoreReport, SnapshotDescriptor, SnapshotError, SnapshotTrigger,
    StartupReport, SNAPSHOTS,
};

// Same-second snapshots get a numeric key suffix; the store's id uniqueness
// arbitrates. Sixteen collisions in one second means something is wrong.
const MAX_KEY_ATTEMPTS: u32 = 16;

/// Creates, lists, and restores full-catalog snapshots, and owns the
/// startup preserve-over-seed policy.
pub struct SnapshotManager<S> {
    store: S,
}

impl<S: DocumentStore> SnapshotManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Manually snapshot the current catalog. Fails with `EmptyCatalog`
    /// when there is nothing to protect.
    pub fn create_snapshot(
        &self,
        identity: &IdentityContext,
    ) -> Result<SnapshotDescriptor, SnapshotError> {
        identity.require_teacher()?;
        self.snapshot_catalog(SnapshotTrigger::Manual)?
            .ok_or(SnapshotError::EmptyCatalog)
    }

    /// All snapshots, most recent first.
    pub fn list_snapshots(
        &self,
        identity: &IdentityContext,
    ) -> Result<Vec<SnapshotDescriptor>, SnapshotError> {
        identity.require_teacher()?;
        let snapshots: Vec<CatalogSnapshot> =
            self.store.find(SNAPSHOTS, &|_: &CatalogSnapshot| true)?;

        let mut descriptors: Vec<SnapshotDescriptor> = snapshots
            .into_iter()
            .map(|snap| SnapshotDescriptor {
                readable_time: naming::readable_time(&snap.timestamp_key),
                word_count: snap.words.len(),
                collection_name: snap.collection_name,
                timestamp_key: snap.timestamp_key,
            })
            .collect();
        descriptors.sort_by(|a, b| {
            (b.timestamp_key.as_str(), b.collection_name.as_str())
                .cmp(&(a.timestamp_key.as_str(), a.collection_name.as_str()))
        });
        Ok(descriptors)
    }

    /// Roll the live catalog back to a named snapshot.
    ///
    /// A safety snapshot of the current (non-empty) catalog is taken before
    /// anything is mutated, so the restore itself can always be undone. The
    /// catalog replacement is a single atomic store operation.
    pub fn restore_snapshot(
        &self,
        identity: &IdentityContext,
        collection_name: &str,
    ) -> Result<RestoreReport, SnapshotError> {
        identity.require_teacher()?;

        if !naming::is_snapshot_collection(collection_name) {
            return Err(SnapshotError::SnapshotNotFound(collection_name.to_string()));
        }
        let snapshot: CatalogSnapshot = self
            .store
            .find_one(SNAPSHOTS, &|s: &CatalogSnapshot| {
                s.collection_name == collection_name
            })?
            .ok_or_else(|| SnapshotError::SnapshotNotFound(collection_name.to_string()))?;

        let safety = self.snapshot_catalog(SnapshotTrigger::PreRestore)?;

        if snapshot.words.is_empty() {
            return Err(SnapshotError::EmptySnapshot(collection_name.to_string()));
        }

        let word_count = self.store.replace_all(catalog::WORDS, &snapshot.words)?;
        info!(
            restored_from = %collection_name,
            words = word_count,
            "catalog restored from snapshot"
        );

        Ok(RestoreReport {
            restored_from: collection_name.to_string(),
            word_count,
            pre_restore_snapshot: safety.map(|d| d.collection_name),
        })
    }

    /// Startup policy: unconditionally snapshot whatever catalog exists,
    /// then seed the bundled default set only if the catalog is completely
    /// empty. Best-effort: failures are logged and skip the affected step,
    /// but a failed emptiness check also skips seeding, so an existing
    /// catalog is never overwritten even on a degraded start.
    pub fn run_startup(&self) -> StartupReport {
        let snapshot = match self.snapshot_catalog(SnapshotTrigger::Startup) {
            Ok(descriptor) => {
                if let Some(d) = &descriptor {
                    info!(
                        collection = %d.collection_name,
                        words = d.word_count,
                        "catalog backed up at startup"
                    );
                }
                descriptor
            }
            Err(err) => {
                warn!(%err, "startup backup failed");
                None
            }
        };

        let (seeded, preserved) = match self
            .store
            .count_documents::<WordCard>(catalog::WORDS, &|_| true)
        {
            Ok(0) => match self.store.insert_many(catalog::WORDS, &catalog::default_cards()) {
                Ok(count) => {
                    info!(words = count, "seeded default catalog");
                    (count, 0)
                }
                Err(err) => {
                    warn!(%err, "seeding default catalog failed");
                    (0, 0)
                }
            },
            Ok(count) => {
                info!(words = count, "preserved existing catalog");
                (0, count as usize)
            }
            Err(err) => {
                warn!(%err, "catalog count failed, seeding skipped");
                (0, 0)
            }
        };

        StartupReport {
            snapshot,
            seeded,
            preserved,
        }
    }

    /// Copy the current catalog into a new snapshot document. Returns
    /// `None` (taking no snapshot) when the catalog is empty.
    fn snapshot_catalog(
        &self,
        trigger: SnapshotTrigger,
    ) -> Result<Option<SnapshotDescriptor>, SnapshotError> {
        let words: Vec<WordCard> = self.store.find(catalog::WORDS, &|_: &WordCard| true)?;
        if words.is_empty() {
            return Ok(None);
        }
        let word_count = words.len();
        let base = naming::timestamp_key(Utc::now());

        for attempt in 1..=MAX_KEY_ATTEMPTS {
            let key = if attempt == 1 {
                base.clone()
            } else {
                format!("{}_{}", base, attempt)
            };
            let collection_name = naming::collection_name(trigger, &key);
            let snapshot = CatalogSnapshot {
                collection_name: collection_name.clone(),
                timestamp_key: key.clone(),
                words: words.clone(),
            };
            match self.store.insert_one(SNAPSHOTS, &snapshot) {
                Ok(()) => {
                    return Ok(Some(SnapshotDescriptor {
                        readable_time: naming::readable_time(&key),
                        collection_name,
                        timestamp_key: key,
                        word_count,
                    }))
                }
                Err(StoreError::DuplicateId { .. }) => continue,
                Err(err) => return Err(err.into()),
            }
        }
        Err(SnapshotError::Store(StoreError::DuplicateId {
            collection: SNAPSHOTS.to_string(),
            id: naming::collection_name(trigger, &base),
        }))
    }
}
