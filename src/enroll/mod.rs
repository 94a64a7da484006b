//! EnrollmentCodeRegistry - teacher-issued codes gating student
//! self-registration into a class.
//!
//! A code is usable while it is active, unexpired, and under its use quota.
//! Validation is side-effect free; consumption increments the use counter
//! with a single conditional update so that two students racing for the
//! last remaining use can never push the counter past the quota.

mod registry;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::identity::AuthError;
use crate::store::{Document, StoreError};

/// Collection holding enrollment codes.
pub const CODES: &str = "enrollment_codes";

/// Class details attached to a code and inherited by enrolling students.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

/// A class-enrollment code.
///
/// The code string is unique among **active** codes; a deactivated or
/// expired code's string may be reissued. `current_uses` only increases,
/// exactly once per successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentCode {
    pub id: String,
    pub code: String,
    pub issuer_id: String,
    pub class_name: String,
    pub max_uses: u32,
    pub current_uses: u32,
    pub expires_at: DateTime<Utc>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub metadata: ClassMetadata,
}

impl Document for EnrollmentCode {
    fn id(&self) -> &str {
        &self.id
    }
}

/// What a student learns from a valid code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassInfo {
    pub class_name: String,
    pub block_number: Option<u32>,
    pub school: Option<String>,
    pub grade: Option<String>,
    pub teacher_display_name: String,
    pub uses_remaining: u32,
}

/// Request to issue a new code.
#[derive(Debug, Clone)]
pub struct IssueCode {
    pub class_name: String,
    pub max_uses: u32,
    pub ttl: chrono::Duration,
    pub metadata: ClassMetadata,
}

/// Resolves a user id to a display name. Provided by the account layer (or
/// any external user directory).
pub trait UserDirectory: Send + Sync {
    fn display_name(&self, user_id: &str) -> Option<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrollError {
    Unauthorized(AuthError),
    /// max_uses of zero or a non-positive ttl.
    InvalidRequest(String),
    /// No active code matches.
    CodeNotFound(String),
    /// The code exists but its expiry has passed.
    CodeExpired(String),
    /// The code exists but its use quota is spent.
    CodeExhausted(String),
    /// The caller is not the issuer of the code.
    NotOwner(String),
    Store(StoreError),
}

impl fmt::Display for EnrollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnrollError::Unauthorized(e) => write!(f, "{}", e),
            EnrollError::InvalidRequest(msg) => write!(f, "invalid code request: {}", msg),
            EnrollError::CodeNotFound(code) => write!(f, "code not found: {}", code),
            EnrollError::CodeExpired(code) => write!(f, "code expired: {}", code),
            EnrollError::CodeExhausted(code) => write!(f, "code exhausted: {}", code),
            EnrollError::NotOwner(id) => write!(f, "not the issuer of code {}", id),
            EnrollError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for EnrollError {}

impl From<AuthError> for EnrollError {
    fn from(err: AuthError) -> Self {
        EnrollError::Unauthorized(err)
    }
}

impl From<StoreError> for EnrollError {
    fn from(err: StoreError) -> Self {
        EnrollError::Store(err)
    }
}

pub use registry::{EnrollmentCodeRegistry, DEFAULT_CODE_LENGTH};
