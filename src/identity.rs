//! Identity context consumed from the external auth collaborator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller role. The core never verifies credentials; it trusts the role the
/// auth layer resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
}

/// An authenticated caller, as handed over by the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityContext {
    pub caller_id: String,
    pub role: Role,
}

impl IdentityContext {
    pub fn new(caller_id: impl Into<String>, role: Role) -> Self {
        Self {
            caller_id: caller_id.into(),
            role,
        }
    }

    /// Reject non-teacher callers. Called before any store access on
    /// teacher-only operations.
    pub fn require_teacher(&self) -> Result<(), AuthError> {
        match self.role {
            Role::Teacher => Ok(()),
            Role::Student => Err(AuthError::TeacherRequired),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    TeacherRequired,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::TeacherRequired => write!(f, "teacher role required"),
        }
    }
}

impl std::error::Error for AuthError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn teacher_passes_gate() {
        let identity = IdentityContext::new("t-1", Role::Teacher);
        assert!(identity.require_teacher().is_ok());
    }

    #[test]
    fn student_rejected_at_gate() {
        let identity = IdentityContext::new("s-1", Role::Student);
        assert_eq!(
            identity.require_teacher().unwrap_err(),
            AuthError::TeacherRequired
        );
    }
}
