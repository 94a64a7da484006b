//! Account operations and ScoreEngine integration.

use chrono::Utc;
use std::collections::BTreeSet;
use tracing::info;
use uuid::Uuid;

use crate::catalog::{self, WordCard};
use crate::config::AdminConfig;
use crate::enroll::{ClassInfo, UserDirectory};
use crate::identity::{IdentityContext, Role};
use crate::score;
use crate::store::DocumentStore;

use super::{
    AccountError, LeaderboardEntry, NewAccount, QuizResult, StudentProgress, StudySession,
    UserAccount, QUIZ_RESULTS, STUDY_SESSIONS, USERS,
};

const LEADERBOARD_SIZE: usize = 10;

/// Account CRUD, point-earning events, and profile materialization.
pub struct AccountService<S> {
    store: S,
}

impl<S: DocumentStore> AccountService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create an account. A provided [`ClassInfo`] (from a consumed
    /// enrollment code) populates the class fields. Duplicate emails are
    /// rejected atomically.
    pub fn create_account(
        &self,
        new: NewAccount,
        class: Option<&ClassInfo>,
    ) -> Result<UserAccount, AccountError> {
        let email = new.email.trim().to_ascii_lowercase();
        let account = UserAccount {
            id: Uuid::new_v4().to_string(),
            email: email.clone(),
            first_name: new.first_name,
            last_name: new.last_name,
            role: new.role,
            created_at: Utc::now(),
            level: 1,
            total_points: 0,
            streak_days: 0,
            badges: BTreeSet::new(),
            class_name: class.map(|c| c.class_name.clone()),
            class_teacher: class.map(|c| c.teacher_display_name.clone()),
            class_block: class.and_then(|c| c.block_number),
            class_school: class.and_then(|c| c.school.clone()),
            class_grade: class.and_then(|c| c.grade.clone()),
        };
        let inserted = self
            .store
            .insert_unique(USERS, &account, &|existing| existing.email == email)?;
        if !inserted {
            return Err(AccountError::EmailTaken(email));
        }
        Ok(account)
    }

    /// Materialize a profile: recompute level and badges from the stored
    /// totals, persist them as a cache, and return the refreshed account.
    pub fn profile(&self, user_id: &str) -> Result<UserAccount, AccountError> {
        let account = self.account(user_id)?;
        let level = score::level_for(account.total_points);
        let badges = score::badges_for(account.total_points, level, account.streak_days);

        self.store.update_one(
            USERS,
            &|u: &UserAccount| u.id == user_id,
            &|u: &mut UserAccount| {
                u.level = level;
                u.badges = badges.clone();
            },
        )?;

        Ok(UserAccount {
            level,
            badges,
            ..account
        })
    }

    /// Record a study answer. Correct answers earn the word's point value;
    /// incorrect answers record a zero-point session.
    pub fn record_study_answer(
        &self,
        user_id: &str,
        word_id: &str,
        correct: bool,
    ) -> Result<u32, AccountError> {
        self.account(user_id)?;
        let word: WordCard = self
            .store
            .find_one(catalog::WORDS, &|w: &WordCard| w.id == word_id)?
            .ok_or_else(|| AccountError::WordNotFound(word_id.to_string()))?;
        let points_earned = if correct { word.points } else { 0 };

        let session = StudySession {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            word_id: word_id.to_string(),
            correct,
            timestamp: Utc::now(),
            points_earned,
        };
        self.store.insert_one(STUDY_SESSIONS, &session)?;

        if points_earned > 0 {
            self.add_points(user_id, points_earned)?;
        }
        Ok(points_earned)
    }

    /// Record a quiz result: a fixed number of points per correct answer.
    pub fn record_quiz_result(
        &self,
        user_id: &str,
        score: u32,
        total_questions: u32,
    ) -> Result<u32, AccountError> {
        self.account(user_id)?;
        let points_earned = score * crate::score::POINTS_PER_QUIZ_ANSWER;

        let result = QuizResult {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            score,
            total_questions,
            timestamp: Utc::now(),
            points_earned,
        };
        self.store.insert_one(QUIZ_RESULTS, &result)?;

        if points_earned > 0 {
            self.add_points(user_id, points_earned)?;
        }
        Ok(points_earned)
    }

    /// Top students by cached point total, descending.
    pub fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, AccountError> {
        let mut students = self
            .store
            .find(USERS, &|u: &UserAccount| u.role == Role::Student)?;
        students.sort_by(|a, b| b.total_points.cmp(&a.total_points));
        students.truncate(LEADERBOARD_SIZE);
        Ok(students
            .into_iter()
            .map(|u| LeaderboardEntry {
                first_name: u.first_name,
                last_name: u.last_name,
                level: u.level,
                total_points: u.total_points,
                badges: u.badges,
            })
            .collect())
    }

    /// A student's study and quiz history. Teacher-only.
    pub fn progress(
        &self,
        identity: &IdentityContext,
        user_id: &str,
    ) -> Result<StudentProgress, AccountError> {
        identity.require_teacher()?;
        let mut study_sessions = self
            .store
            .find(STUDY_SESSIONS, &|s: &StudySession| s.user_id == user_id)?;
        study_sessions.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        let mut quiz_results = self
            .store
            .find(QUIZ_RESULTS, &|r: &QuizResult| r.user_id == user_id)?;
        quiz_results.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(StudentProgress {
            user_id: user_id.to_string(),
            study_sessions,
            quiz_results,
        })
    }

    /// Full account roster. Teacher-only.
    pub fn accounts(&self, identity: &IdentityContext) -> Result<Vec<UserAccount>, AccountError> {
        identity.require_teacher()?;
        let mut accounts = self.store.find(USERS, &|_: &UserAccount| true)?;
        accounts.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(accounts)
    }

    /// Idempotent admin provisioning from configuration. Returns whether an
    /// account was created. Never overwrites an existing account.
    pub fn provision_admin(&self, admin: &AdminConfig) -> Result<bool, AccountError> {
        let created = self
            .create_account(
                NewAccount {
                    email: admin.email.clone(),
                    first_name: admin.first_name.clone(),
                    last_name: admin.last_name.clone(),
                    role: Role::Teacher,
                },
                None,
            )
            .map(|_| true);
        match created {
            Ok(true) => {
                info!(email = %admin.email, "provisioned admin account");
                Ok(true)
            }
            Err(AccountError::EmailTaken(_)) => Ok(false),
            other => other,
        }
    }

    fn account(&self, user_id: &str) -> Result<UserAccount, AccountError> {
        self.store
            .find_one(USERS, &|u: &UserAccount| u.id == user_id)?
            .ok_or_else(|| AccountError::AccountNotFound(user_id.to_string()))
    }

    fn add_points(&self, user_id: &str, points: u32) -> Result<(), AccountError> {
        let matched = self.store.update_one(
            USERS,
            &|u: &UserAccount| u.id == user_id,
            &|u: &mut UserAccount| u.total_points += points,
        )?;
        if matched == 0 {
            return Err(AccountError::AccountNotFound(user_id.to_string()));
        }
        Ok(())
    }
}

impl<S: DocumentStore> UserDirectory for AccountService<S> {
    fn display_name(&self, user_id: &str) -> Option<String> {
        self.store
            .find_one(USERS, &|u: &UserAccount| u.id == user_id)
            .ok()
            .flatten()
            .map(|u| format!("{} {}", u.first_name, u.last_name))
    }
}
