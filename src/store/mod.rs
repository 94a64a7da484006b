//! DocumentStore - the key-addressable collection abstraction the core
//! depends on.
//!
//! Collections are named at runtime (snapshot collections carry a naming
//! contract), documents are serde types identified by a string id, and the
//! store is the sole synchronization boundary: compound operations such as
//! [`DocumentStore::update_one`], [`DocumentStore::insert_unique`], and
//! [`DocumentStore::replace_all`] are applied atomically.
//!
//! ## Example
//!
//! ```ignore
//! use word_weaver::{Document, DocumentStore, InMemoryDocumentStore};
//!
//! #[derive(Serialize, Deserialize, Clone)]
//! struct Note { id: String, text: String }
//!
//! impl Document for Note {
//!     fn id(&self) -> &str { &self.id }
//! }
//!
//! let store = InMemoryDocumentStore::new();
//! store.insert_one("notes", &note)?;
//! let all = store.find("notes", &|_: &Note| true)?;
//! ```

mod document_store;
mod memory;

use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

/// Trait for types persisted as documents in a store collection.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Returns the unique identifier for this document within its collection.
    fn id(&self) -> &str;
}

/// Error type for document store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store could not be reached or its lock was poisoned.
    Unavailable(String),
    /// Serialization/deserialization error.
    Serde(String),
    /// A document with the same id already exists in the collection.
    DuplicateId { collection: String, id: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(msg) => write!(f, "store unavailable: {}", msg),
            StoreError::Serde(msg) => write!(f, "document serialization error: {}", msg),
            StoreError::DuplicateId { collection, id } => {
                write!(f, "duplicate document id {}:{}", collection, id)
            }
        }
    }
}

impl std::error::Error for StoreError {}

pub use document_store::DocumentStore;
pub use memory::InMemoryDocumentStore;
