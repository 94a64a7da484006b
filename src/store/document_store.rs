//! DocumentStore - abstract collection storage for documents.

use super::{Document, StoreError};

/// Abstract collection storage. Collections are addressed by name; documents
/// within a collection are unique by [`Document::id`].
///
/// Implementations must make every method atomic with respect to concurrent
/// callers. The conditional-update and insert-if-absent methods exist so the
/// core never has to fall back to read-then-write sequences for operations
/// that race (code consumption, code issuance, catalog replacement).
pub trait DocumentStore: Send + Sync {
    /// Insert a document. Fails with `DuplicateId` if the id is taken.
    fn insert_one<D: Document>(&self, collection: &str, doc: &D) -> Result<(), StoreError>;

    /// Insert a batch of documents, all or nothing. Returns the count inserted.
    fn insert_many<D: Document>(&self, collection: &str, docs: &[D]) -> Result<usize, StoreError>;

    /// Insert `doc` unless any existing document in the collection matches
    /// `conflict`. The check and the insert are one atomic step. Returns
    /// `false` (and inserts nothing) when a conflicting document exists.
    fn insert_unique<D: Document>(
        &self,
        collection: &str,
        doc: &D,
        conflict: &dyn Fn(&D) -> bool,
    ) -> Result<bool, StoreError>;

    /// Find all documents matching a predicate.
    fn find<D: Document>(
        &self,
        collection: &str,
        predicate: &dyn Fn(&D) -> bool,
    ) -> Result<Vec<D>, StoreError>;

    /// Find the first document matching a predicate.
    fn find_one<D: Document>(
        &self,
        collection: &str,
        predicate: &dyn Fn(&D) -> bool,
    ) -> Result<Option<D>, StoreError>;

    /// Apply `patch` to the first document matching `predicate`, atomically:
    /// the predicate is re-evaluated against current data under the store's
    /// write exclusion, so a patch never lands on a document the predicate
    /// no longer matches. The patch must leave the document id unchanged.
    /// Returns the matched count (0 or 1).
    fn update_one<D: Document>(
        &self,
        collection: &str,
        predicate: &dyn Fn(&D) -> bool,
        patch: &dyn Fn(&mut D),
    ) -> Result<u64, StoreError>;

    /// Delete the first document matching a predicate. Returns the count deleted.
    fn delete_one<D: Document>(
        &self,
        collection: &str,
        predicate: &dyn Fn(&D) -> bool,
    ) -> Result<u64, StoreError>;

    /// Delete every document matching a predicate. Returns the count deleted.
    fn delete_many<D: Document>(
        &self,
        collection: &str,
        predicate: &dyn Fn(&D) -> bool,
    ) -> Result<u64, StoreError>;

    /// Count documents matching a predicate.
    fn count_documents<D: Document>(
        &self,
        collection: &str,
        predicate: &dyn Fn(&D) -> bool,
    ) -> Result<u64, StoreError>;

    /// Replace the entire contents of a collection with `docs` in one atomic
    /// step. Readers observe either the old contents or the new, never the
    /// emptied intermediate state. Returns the count inserted.
    fn replace_all<D: Document>(&self, collection: &str, docs: &[D]) -> Result<usize, StoreError>;

    /// Enumerate collection names.
    fn list_collections(&self) -> Result<Vec<String>, StoreError>;
}
