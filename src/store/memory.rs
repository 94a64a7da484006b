//! InMemoryDocumentStore - HashMap-backed document store for testing and
//! single-process deployments.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use super::{Document, DocumentStore, StoreError};

type Collection = BTreeMap<String, Vec<u8>>;

/// In-memory document store backed by a HashMap of collections.
///
/// Documents are stored as JSON bytes keyed by their id; iteration order
/// within a collection is stable (id order). Clone-friendly via Arc
/// (cloning shares the same underlying storage). Every compound operation
/// runs under a single write-lock acquisition, which is what makes
/// `update_one`, `insert_unique`, and `replace_all` atomic.
#[derive(Clone)]
pub struct InMemoryDocumentStore {
    storage: Arc<RwLock<HashMap<String, Collection>>>,
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDocumentStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

fn encode<D: Document>(doc: &D) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(doc).map_err(|e| StoreError::Serde(e.to_string()))
}

fn decode<D: Document>(bytes: &[u8]) -> Option<D> {
    // A collection holds one document type; anything that fails to decode
    // is not of the requested type and is skipped, never surfaced.
    serde_json::from_slice(bytes).ok()
}

impl DocumentStore for InMemoryDocumentStore {
    fn insert_one<D: Document>(&self, collection: &str, doc: &D) -> Result<(), StoreError> {
        let bytes = encode(doc)?;
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))?;

        let entries = storage.entry(collection.to_string()).or_default();
        if entries.contains_key(doc.id()) {
            return Err(StoreError::DuplicateId {
                collection: collection.to_string(),
                id: doc.id().to_string(),
            });
        }
        entries.insert(doc.id().to_string(), bytes);
        Ok(())
    }

    fn insert_many<D: Document>(&self, collection: &str, docs: &[D]) -> Result<usize, StoreError> {
        // Serialize and check ids up front so a failure inserts nothing.
        let mut batch = Vec::with_capacity(docs.len());
        for doc in docs {
            batch.push((doc.id().to_string(), encode(doc)?));
        }

        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))?;

        let entries = storage.entry(collection.to_string()).or_default();
        for (id, _) in &batch {
            if entries.contains_key(id) || batch.iter().filter(|(other, _)| other == id).count() > 1
            {
                return Err(StoreError::DuplicateId {
                    collection: collection.to_string(),
                    id: id.clone(),
                });
            }
        }
        let count = batch.len();
        entries.extend(batch);
        Ok(count)
    }

    fn insert_unique<D: Document>(
        &self,
        collection: &str,
        doc: &D,
        conflict: &dyn Fn(&D) -> bool,
    ) -> Result<bool, StoreError> {
        let bytes = encode(doc)?;
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))?;

        let entries = storage.entry(collection.to_string()).or_default();
        if entries.contains_key(doc.id()) {
            return Err(StoreError::DuplicateId {
                collection: collection.to_string(),
                id: doc.id().to_string(),
            });
        }
        for stored in entries.values() {
            if let Some(existing) = decode::<D>(stored) {
                if conflict(&existing) {
                    return Ok(false);
                }
            }
        }
        entries.insert(doc.id().to_string(), bytes);
        Ok(true)
    }

    fn find<D: Document>(
        &self,
        collection: &str,
        predicate: &dyn Fn(&D) -> bool,
    ) -> Result<Vec<D>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))?;

        let mut results = Vec::new();
        if let Some(entries) = storage.get(collection) {
            for stored in entries.values() {
                if let Some(doc) = decode::<D>(stored) {
                    if predicate(&doc) {
                        results.push(doc);
                    }
                }
            }
        }
        Ok(results)
    }

    fn find_one<D: Document>(
        &self,
        collection: &str,
        predicate: &dyn Fn(&D) -> bool,
    ) -> Result<Option<D>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))?;

        if let Some(entries) = storage.get(collection) {
            for stored in entries.values() {
                if let Some(doc) = decode::<D>(stored) {
                    if predicate(&doc) {
                        return Ok(Some(doc));
                    }
                }
            }
        }
        Ok(None)
    }

    fn update_one<D: Document>(
        &self,
        collection: &str,
        predicate: &dyn Fn(&D) -> bool,
        patch: &dyn Fn(&mut D),
    ) -> Result<u64, StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))?;

        let Some(entries) = storage.get_mut(collection) else {
            return Ok(0);
        };
        for stored in entries.values_mut() {
            let Some(mut doc) = decode::<D>(stored) else {
                continue;
            };
            if predicate(&doc) {
                patch(&mut doc);
                *stored = encode(&doc)?;
                return Ok(1);
            }
        }
        Ok(0)
    }

    fn delete_one<D: Document>(
        &self,
        collection: &str,
        predicate: &dyn Fn(&D) -> bool,
    ) -> Result<u64, StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))?;

        let Some(entries) = storage.get_mut(collection) else {
            return Ok(0);
        };
        let mut target = None;
        for (id, stored) in entries.iter() {
            if let Some(doc) = decode::<D>(stored) {
                if predicate(&doc) {
                    target = Some(id.clone());
                    break;
                }
            }
        }
        match target {
            Some(id) => {
                entries.remove(&id);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn delete_many<D: Document>(
        &self,
        collection: &str,
        predicate: &dyn Fn(&D) -> bool,
    ) -> Result<u64, StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))?;

        let Some(entries) = storage.get_mut(collection) else {
            return Ok(0);
        };
        let targets: Vec<String> = entries
            .iter()
            .filter_map(|(id, stored)| {
                decode::<D>(stored)
                    .filter(|doc| predicate(doc))
                    .map(|_| id.clone())
            })
            .collect();
        for id in &targets {
            entries.remove(id);
        }
        Ok(targets.len() as u64)
    }

    fn count_documents<D: Document>(
        &self,
        collection: &str,
        predicate: &dyn Fn(&D) -> bool,
    ) -> Result<u64, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))?;

        let count = match storage.get(collection) {
            Some(entries) => entries
                .values()
                .filter_map(|stored| decode::<D>(stored))
                .filter(|doc| predicate(doc))
                .count(),
            None => 0,
        };
        Ok(count as u64)
    }

    fn replace_all<D: Document>(&self, collection: &str, docs: &[D]) -> Result<usize, StoreError> {
        // Serialize everything before touching the collection so a serde
        // failure cannot leave it half-replaced.
        let mut batch = Vec::with_capacity(docs.len());
        for doc in docs {
            batch.push((doc.id().to_string(), encode(doc)?));
        }

        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))?;

        let entries = storage.entry(collection.to_string()).or_default();
        entries.clear();
        let count = batch.len();
        entries.extend(batch);
        Ok(count)
    }

    fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))?;

        let mut names: Vec<String> = storage.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct TestDoc {
        id: String,
        value: i32,
    }

    impl Document for TestDoc {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn doc(id: &str, value: i32) -> TestDoc {
        TestDoc {
            id: id.into(),
            value,
        }
    }

    #[test]
    fn insert_and_find() {
        let store = InMemoryDocumentStore::new();
        store.insert_one("docs", &doc("1", 42)).unwrap();

        let found = store
            .find_one("docs", &|d: &TestDoc| d.id == "1")
            .unwrap()
            .unwrap();
        assert_eq!(found.value, 42);
    }

    #[test]
    fn insert_duplicate_id_fails() {
        let store = InMemoryDocumentStore::new();
        store.insert_one("docs", &doc("1", 1)).unwrap();
        let err = store.insert_one("docs", &doc("1", 2)).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId { .. }));
    }

    #[test]
    fn insert_many_is_all_or_nothing() {
        let store = InMemoryDocumentStore::new();
        store.insert_one("docs", &doc("2", 2)).unwrap();

        let err = store
            .insert_many("docs", &[doc("1", 1), doc("2", 9)])
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId { .. }));

        // The non-conflicting document must not have been inserted.
        assert!(store
            .find_one("docs", &|d: &TestDoc| d.id == "1")
            .unwrap()
            .is_none());
    }

    #[test]
    fn insert_unique_rejects_conflict() {
        let store = InMemoryDocumentStore::new();
        store.insert_one("docs", &doc("1", 7)).unwrap();

        let inserted = store
            .insert_unique("docs", &doc("2", 7), &|d: &TestDoc| d.value == 7)
            .unwrap();
        assert!(!inserted);
        assert_eq!(store.count_documents::<TestDoc>("docs", &|_| true).unwrap(), 1);

        let inserted = store
            .insert_unique("docs", &doc("2", 8), &|d: &TestDoc| d.value == 8)
            .unwrap();
        assert!(inserted);
    }

    #[test]
    fn find_with_predicate() {
        let store = InMemoryDocumentStore::new();
        store
            .insert_many("docs", &[doc("1", 10), doc("2", 20), doc("3", 5)])
            .unwrap();

        let results = store.find("docs", &|d: &TestDoc| d.value > 8).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn update_one_applies_patch_once() {
        let store = InMemoryDocumentStore::new();
        store
            .insert_many("docs", &[doc("1", 1), doc("2", 1)])
            .unwrap();

        let matched = store
            .update_one(
                "docs",
                &|d: &TestDoc| d.value == 1,
                &|d: &mut TestDoc| d.value += 10,
            )
            .unwrap();
        assert_eq!(matched, 1);

        let bumped = store.find("docs", &|d: &TestDoc| d.value == 11).unwrap();
        assert_eq!(bumped.len(), 1);
    }

    #[test]
    fn update_one_misses_when_predicate_no_longer_holds() {
        let store = InMemoryDocumentStore::new();
        store.insert_one("docs", &doc("1", 5)).unwrap();

        let matched = store
            .update_one(
                "docs",
                &|d: &TestDoc| d.value < 5,
                &|d: &mut TestDoc| d.value += 1,
            )
            .unwrap();
        assert_eq!(matched, 0);
    }

    #[test]
    fn delete_one_and_many() {
        let store = InMemoryDocumentStore::new();
        store
            .insert_many("docs", &[doc("1", 1), doc("2", 1), doc("3", 2)])
            .unwrap();

        assert_eq!(
            store
                .delete_one("docs", &|d: &TestDoc| d.value == 1)
                .unwrap(),
            1
        );
        assert_eq!(
            store
                .delete_many("docs", &|_: &TestDoc| true)
                .unwrap(),
            2
        );
        assert_eq!(store.count_documents::<TestDoc>("docs", &|_| true).unwrap(), 0);
    }

    #[test]
    fn delete_missing_returns_zero() {
        let store = InMemoryDocumentStore::new();
        assert_eq!(
            store
                .delete_one("docs", &|_: &TestDoc| true)
                .unwrap(),
            0
        );
    }

    #[test]
    fn replace_all_swaps_contents() {
        let store = InMemoryDocumentStore::new();
        store
            .insert_many("docs", &[doc("1", 1), doc("2", 2)])
            .unwrap();

        let count = store
            .replace_all("docs", &[doc("9", 9)])
            .unwrap();
        assert_eq!(count, 1);

        let all = store.find("docs", &|_: &TestDoc| true).unwrap();
        assert_eq!(all, vec![doc("9", 9)]);
    }

    #[test]
    fn list_collections_sorted() {
        let store = InMemoryDocumentStore::new();
        store.insert_one("words", &doc("1", 1)).unwrap();
        store.insert_one("codes", &doc("1", 1)).unwrap();

        assert_eq!(store.list_collections().unwrap(), vec!["codes", "words"]);
    }

    #[test]
    fn clone_shares_storage() {
        let store = InMemoryDocumentStore::new();
        let clone = store.clone();
        store.insert_one("docs", &doc("1", 3)).unwrap();

        let loaded = clone
            .find_one("docs", &|d: &TestDoc| d.id == "1")
            .unwrap()
            .unwrap();
        assert_eq!(loaded.value, 3);
    }
}
