#![allow(dead_code)]

use std::collections::HashMap;

use word_weaver::{
    CardKind, ClassMetadata, Difficulty, IdentityContext, IssueCode, Role, UserDirectory,
    WordCardDraft,
};

pub fn teacher(id: &str) -> IdentityContext {
    IdentityContext::new(id, Role::Teacher)
}

pub fn student(id: &str) -> IdentityContext {
    IdentityContext::new(id, Role::Student)
}

/// Fixed-map user directory for tests that don't need the account layer.
pub struct StubDirectory {
    names: HashMap<String, String>,
}

impl StubDirectory {
    pub fn new() -> Self {
        Self {
            names: HashMap::new(),
        }
    }

    pub fn with(mut self, user_id: &str, name: &str) -> Self {
        self.names.insert(user_id.to_string(), name.to_string());
        self
    }
}

impl UserDirectory for StubDirectory {
    fn display_name(&self, user_id: &str) -> Option<String> {
        self.names.get(user_id).cloned()
    }
}

pub fn draft(root: &str) -> WordCardDraft {
    WordCardDraft {
        kind: CardKind::Root,
        root: root.to_string(),
        origin: "Latin".to_string(),
        meaning: "carry".to_string(),
        examples: vec!["transport".to_string(), "portable".to_string()],
        definition: "A root meaning to carry".to_string(),
        difficulty: Difficulty::Intermediate,
        points: 15,
        category: "movement".to_string(),
    }
}

pub fn issue_request(class_name: &str, max_uses: u32) -> IssueCode {
    IssueCode {
        class_name: class_name.to_string(),
        max_uses,
        ttl: chrono::Duration::days(1),
        metadata: ClassMetadata::default(),
    }
}
