//! Catalog service - word-card CRUD over the document store.

use uuid::Uuid;

use crate::identity::IdentityContext;
use crate::store::DocumentStore;

use super::{CatalogError, WordCard, WordCardDraft, WORDS};

/// Word-card read and mutation operations. Reads are open to any
/// authenticated caller; mutations are teacher-only.
pub struct Catalog<S> {
    store: S,
}

impl<S: DocumentStore> Catalog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All word cards in the live catalog.
    pub fn words(&self) -> Result<Vec<WordCard>, CatalogError> {
        Ok(self.store.find(WORDS, &|_: &WordCard| true)?)
    }

    pub fn word_count(&self) -> Result<u64, CatalogError> {
        Ok(self.store.count_documents::<WordCard>(WORDS, &|_| true)?)
    }

    /// Create a word card with a fresh id.
    pub fn create_word(
        &self,
        identity: &IdentityContext,
        draft: WordCardDraft,
    ) -> Result<WordCard, CatalogError> {
        identity.require_teacher()?;
        let word = draft.into_card(Uuid::new_v4().to_string());
        self.store.insert_one(WORDS, &word)?;
        Ok(word)
    }

    /// Replace every editable field of an existing card.
    pub fn update_word(
        &self,
        identity: &IdentityContext,
        word_id: &str,
        draft: WordCardDraft,
    ) -> Result<(), CatalogError> {
        identity.require_teacher()?;
        let matched = self.store.update_one(
            WORDS,
            &|w: &WordCard| w.id == word_id,
            &|w: &mut WordCard| {
                w.kind = draft.kind;
                w.root = draft.root.clone();
                w.origin = draft.origin.clone();
                w.meaning = draft.meaning.clone();
                w.examples = draft.examples.clone();
                w.definition = draft.definition.clone();
                w.difficulty = draft.difficulty;
                w.points = draft.points;
                w.category = draft.category.clone();
            },
        )?;
        if matched == 0 {
            return Err(CatalogError::WordNotFound(word_id.to_string()));
        }
        Ok(())
    }

    pub fn delete_word(
        &self,
        identity: &IdentityContext,
        word_id: &str,
    ) -> Result<(), CatalogError> {
        identity.require_teacher()?;
        let deleted = self
            .store
            .delete_one(WORDS, &|w: &WordCard| w.id == word_id)?;
        if deleted == 0 {
            return Err(CatalogError::WordNotFound(word_id.to_string()));
        }
        Ok(())
    }
}
