//! Catalog - the live, mutable collection of word cards served to students.
//!
//! Word cards describe Greek/Latin prefixes, roots, and suffixes. Teachers
//! edit the catalog in place; the snapshot manager protects it against
//! destructive edits (see [`crate::snapshot`]).

mod seed;
mod service;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::identity::AuthError;
use crate::store::{Document, StoreError};

/// Collection holding the live catalog.
pub const WORDS: &str = "words";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Prefix,
    Root,
    Suffix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Conventional point value for this difficulty. Advisory: mutation
    /// operations accept any point value, callers enforce the convention.
    pub fn default_points(self) -> u32 {
        match self {
            Difficulty::Beginner => 10,
            Difficulty::Intermediate => 15,
            Difficulty::Advanced => 20,
        }
    }
}

/// A vocabulary word card. `id` is immutable and globally unique once
/// assigned; everything else may be edited in place by a teacher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCard {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: CardKind,
    pub root: String,
    pub origin: String,
    pub meaning: String,
    pub examples: Vec<String>,
    pub definition: String,
    pub difficulty: Difficulty,
    pub points: u32,
    pub category: String,
}

impl Document for WordCard {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Editable word-card fields, used for create and full-replace update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCardDraft {
    #[serde(rename = "type")]
    pub kind: CardKind,
    pub root: String,
    pub origin: String,
    pub meaning: String,
    pub examples: Vec<String>,
    pub definition: String,
    pub difficulty: Difficulty,
    pub points: u32,
    pub category: String,
}

impl WordCardDraft {
    fn into_card(self, id: String) -> WordCard {
        WordCard {
            id,
            kind: self.kind,
            root: self.root,
            origin: self.origin,
            meaning: self.meaning,
            examples: self.examples,
            definition: self.definition,
            difficulty: self.difficulty,
            points: self.points,
            category: self.category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    Unauthorized(AuthError),
    WordNotFound(String),
    Store(StoreError),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Unauthorized(e) => write!(f, "{}", e),
            CatalogError::WordNotFound(id) => write!(f, "word not found: {}", id),
            CatalogError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<AuthError> for CatalogError {
    fn from(err: AuthError) -> Self {
        CatalogError::Unauthorized(err)
    }
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        CatalogError::Store(err)
    }
}

pub use seed::default_cards;
pub use service::Catalog;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_point_convention() {
        assert_eq!(Difficulty::Beginner.default_points(), 10);
        assert_eq!(Difficulty::Intermediate.default_points(), 15);
        assert_eq!(Difficulty::Advanced.default_points(), 20);
    }

    #[test]
    fn card_kind_serializes_as_type_field() {
        let card = default_cards().remove(0);
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["type"], "prefix");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn seed_points_match_difficulty() {
        for card in default_cards() {
            assert_eq!(card.points, card.difficulty.default_points(), "{}", card.root);
        }
    }

    #[test]
    fn seed_ids_are_unique() {
        let cards = default_cards();
        let mut ids: Vec<&str> = cards.iter().map(|c| c.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), cards.len());
    }
}
