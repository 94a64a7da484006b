//! Accounts - user records, point-earning events, and derived scoring.
//!
//! `level` and `badges` are caches of the pure score functions, recomputed
//! on every profile read; the stored values are never trusted as input.
//! No credential material lives here; password hashing and token handling
//! are the auth collaborator's problem.

mod service;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::identity::{AuthError, Role};
use crate::store::{Document, StoreError};

pub const USERS: &str = "users";
pub const STUDY_SESSIONS: &str = "study_sessions";
pub const QUIZ_RESULTS: &str = "quiz_results";

/// A student or teacher account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub level: u32,
    pub total_points: u32,
    pub streak_days: u32,
    pub badges: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_teacher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_block: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_school: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_grade: Option<String>,
}

impl Document for UserAccount {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Fields the registration flow provides for a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

/// One answered study card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudySession {
    pub id: String,
    pub user_id: String,
    pub word_id: String,
    pub correct: bool,
    pub timestamp: DateTime<Utc>,
    pub points_earned: u32,
}

impl Document for StudySession {
    fn id(&self) -> &str {
        &self.id
    }
}

/// One completed quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub id: String,
    pub user_id: String,
    pub score: u32,
    pub total_questions: u32,
    pub timestamp: DateTime<Utc>,
    pub points_earned: u32,
}

impl Document for QuizResult {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A student's full event history, for teacher review.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentProgress {
    pub user_id: String,
    pub study_sessions: Vec<StudySession>,
    pub quiz_results: Vec<QuizResult>,
}

/// Leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub first_name: String,
    pub last_name: String,
    pub level: u32,
    pub total_points: u32,
    pub badges: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    Unauthorized(AuthError),
    AccountNotFound(String),
    WordNotFound(String),
    /// Another account already uses this email.
    EmailTaken(String),
    Store(StoreError),
}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountError::Unauthorized(e) => write!(f, "{}", e),
            AccountError::AccountNotFound(id) => write!(f, "account not found: {}", id),
            AccountError::WordNotFound(id) => write!(f, "word not found: {}", id),
            AccountError::EmailTaken(email) => write!(f, "email already registered: {}", email),
            AccountError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AccountError {}

impl From<AuthError> for AccountError {
    fn from(err: AuthError) -> Self {
        AccountError::Unauthorized(err)
    }
}

impl From<StoreError> for AccountError {
    fn from(err: StoreError) -> Self {
        AccountError::Store(err)
    }
}

pub use service::AccountService;
