//! Code issuance, validation, and atomic consumption.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tracing::info;
use uuid::Uuid;

use crate::identity::IdentityContext;
use crate::store::DocumentStore;

use super::{ClassInfo, EnrollError, EnrollmentCode, IssueCode, UserDirectory, CODES};

/// Code alphabet: uppercase letters and digits, with the confusable glyphs
/// 0/O/1/I/L removed.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// Default generated code length.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Label used when the issuer cannot be resolved by the directory.
const UNKNOWN_TEACHER: &str = "Unknown teacher";

/// Generates, validates, consumes, and revokes class-enrollment codes.
pub struct EnrollmentCodeRegistry<S, D> {
    store: S,
    directory: D,
    code_length: usize,
}

impl<S: DocumentStore, D: UserDirectory> EnrollmentCodeRegistry<S, D> {
    pub fn new(store: S, directory: D) -> Self {
        Self {
            store,
            directory,
            code_length: DEFAULT_CODE_LENGTH,
        }
    }

    /// Override the generated code length. Builder pattern.
    pub fn with_code_length(mut self, code_length: usize) -> Self {
        self.code_length = code_length.max(1);
        self
    }

    /// Issue a fresh code for the caller's class. Generation retries until
    /// a candidate collides with no active code; the uniqueness check and
    /// the insert are one atomic store operation.
    pub fn issue_code(
        &self,
        identity: &IdentityContext,
        request: IssueCode,
    ) -> Result<EnrollmentCode, EnrollError> {
        identity.require_teacher()?;
        if request.max_uses == 0 {
            return Err(EnrollError::InvalidRequest("max_uses must be at least 1".into()));
        }
        if request.ttl <= Duration::zero() {
            return Err(EnrollError::InvalidRequest("ttl must be positive".into()));
        }

        let now = Utc::now();
        loop {
            let code = generate_code(self.code_length);
            let candidate = EnrollmentCode {
                id: Uuid::new_v4().to_string(),
                code: code.clone(),
                issuer_id: identity.caller_id.clone(),
                class_name: request.class_name.clone(),
                max_uses: request.max_uses,
                current_uses: 0,
                expires_at: now + request.ttl,
                active: true,
                created_at: now,
                metadata: request.metadata.clone(),
            };
            let inserted = self.store.insert_unique(CODES, &candidate, &|existing| {
                existing.active && existing.code == code
            })?;
            if inserted {
                info!(code = %candidate.code, class = %candidate.class_name, "enrollment code issued");
                return Ok(candidate);
            }
        }
    }

    /// Look up a code without consuming a use. Case-insensitive and
    /// whitespace-tolerant; only active codes are considered.
    pub fn validate_code(&self, raw: &str) -> Result<ClassInfo, EnrollError> {
        let code = normalize(raw);
        let found = self
            .store
            .find_one(CODES, &|c: &EnrollmentCode| c.active && c.code == code)?
            .ok_or_else(|| EnrollError::CodeNotFound(code.clone()))?;
        self.class_info(&found, Utc::now())
    }

    /// Consume one use as part of student registration. An absent or blank
    /// code is the valid enrollment-free path and returns `None`.
    ///
    /// The increment is a single conditional update: it lands only if the
    /// usability predicate still holds at patch time, so concurrent
    /// registrations can never push `current_uses` past `max_uses`.
    pub fn consume_code(&self, raw: Option<&str>) -> Result<Option<ClassInfo>, EnrollError> {
        let Some(raw) = raw else {
            return Ok(None);
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }

        let code = normalize(raw);
        let mut info = self.validate_code(&code)?;

        let now = Utc::now();
        let matched = self.store.update_one(
            CODES,
            &|c: &EnrollmentCode| {
                c.active && c.code == code && now < c.expires_at && c.current_uses < c.max_uses
            },
            &|c: &mut EnrollmentCode| c.current_uses += 1,
        )?;
        if matched == 0 {
            // Lost a race between validation and increment; re-read to
            // report the accurate failure.
            return Err(self.classify_consume_failure(&code));
        }

        info.uses_remaining = info.uses_remaining.saturating_sub(1);
        Ok(Some(info))
    }

    /// Soft-toggle a code's active flag. Returns the new state.
    pub fn toggle_active(
        &self,
        identity: &IdentityContext,
        code_id: &str,
    ) -> Result<bool, EnrollError> {
        identity.require_teacher()?;
        let existing = self.owned_code(identity, code_id)?;

        let matched = self.store.update_one(
            CODES,
            &|c: &EnrollmentCode| c.id == code_id && c.issuer_id == identity.caller_id,
            &|c: &mut EnrollmentCode| c.active = !c.active,
        )?;
        if matched == 0 {
            return Err(EnrollError::CodeNotFound(code_id.to_string()));
        }
        Ok(!existing.active)
    }

    /// Hard-delete a code.
    pub fn delete_code(
        &self,
        identity: &IdentityContext,
        code_id: &str,
    ) -> Result<(), EnrollError> {
        identity.require_teacher()?;
        self.owned_code(identity, code_id)?;

        let deleted = self.store.delete_one(CODES, &|c: &EnrollmentCode| {
            c.id == code_id && c.issuer_id == identity.caller_id
        })?;
        if deleted == 0 {
            return Err(EnrollError::CodeNotFound(code_id.to_string()));
        }
        Ok(())
    }

    /// The caller's own codes, newest first.
    pub fn codes_for_issuer(
        &self,
        identity: &IdentityContext,
    ) -> Result<Vec<EnrollmentCode>, EnrollError> {
        identity.require_teacher()?;
        let mut codes = self.store.find(CODES, &|c: &EnrollmentCode| {
            c.issuer_id == identity.caller_id
        })?;
        codes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(codes)
    }

    fn owned_code(
        &self,
        identity: &IdentityContext,
        code_id: &str,
    ) -> Result<EnrollmentCode, EnrollError> {
        let existing = self
            .store
            .find_one(CODES, &|c: &EnrollmentCode| c.id == code_id)?
            .ok_or_else(|| EnrollError::CodeNotFound(code_id.to_string()))?;
        if existing.issuer_id != identity.caller_id {
            return Err(EnrollError::NotOwner(code_id.to_string()));
        }
        Ok(existing)
    }

    fn class_info(
        &self,
        code: &EnrollmentCode,
        now: DateTime<Utc>,
    ) -> Result<ClassInfo, EnrollError> {
        if now >= code.expires_at {
            return Err(EnrollError::CodeExpired(code.code.clone()));
        }
        if code.current_uses >= code.max_uses {
            return Err(EnrollError::CodeExhausted(code.code.clone()));
        }
        let teacher_display_name = self
            .directory
            .display_name(&code.issuer_id)
            .unwrap_or_else(|| UNKNOWN_TEACHER.to_string());
        Ok(ClassInfo {
            class_name: code.class_name.clone(),
            block_number: code.metadata.block_number,
            school: code.metadata.school.clone(),
            grade: code.metadata.grade.clone(),
            teacher_display_name,
            uses_remaining: code.max_uses - code.current_uses,
        })
    }

    fn classify_consume_failure(&self, code: &str) -> EnrollError {
        let found = match self
            .store
            .find_one(CODES, &|c: &EnrollmentCode| c.active && c.code == code)
        {
            Ok(found) => found,
            Err(err) => return err.into(),
        };
        match found {
            None => EnrollError::CodeNotFound(code.to_string()),
            Some(c) if Utc::now() >= c.expires_at => EnrollError::CodeExpired(code.to_string()),
            Some(_) => EnrollError::CodeExhausted(code.to_string()),
        }
    }
}

fn normalize(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

fn generate_code(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}
