//! Password and recovery-link lifecycle.
//!
//! Hashing is delegated to the credential store; only the hash is ever
//! kept on the entity. Accounts registered through an OAuth provider may
//! have no local password at all.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::password::{hash_password, verify_password, PasswordError};
use crate::token::generate_link_token;

use super::User;

impl User {
    /// Set the local password.
    ///
    /// Always re-hashes and replaces the stored hash; no history is
    /// retained.
    pub fn set_password(&mut self, plaintext: &str) -> Result<(), PasswordError> {
        self.password = Some(hash_password(plaintext)?);
        Ok(())
    }

    /// Verify a candidate password.
    ///
    /// Returns `false` when no local password is stored (OAuth-only
    /// accounts) or when the candidate does not match.
    pub fn verify_password(&self, candidate: &str) -> bool {
        match &self.password {
            Some(hash) => verify_password(candidate, hash),
            None => false,
        }
    }

    /// Generate a password recovery link.
    ///
    /// Issues a fresh token with an expiry of the entity's configured
    /// hour count (24 by default). The current password is not touched.
    pub fn generate_password_link(&mut self) {
        self.password_link = Some(generate_link_token());
        self.password_link_expires =
            Some(Utc::now() + Duration::hours(self.password_link_expires_in));
        debug!(user_id = ?self.id, "Password recovery link generated");
    }

    /// Whether the recovery link has expired.
    ///
    /// See [`User::password_link_expired_at`].
    pub fn password_link_expired(&self) -> bool {
        self.password_link_expired_at(Utc::now())
    }

    /// Whether the recovery link has expired at the given instant.
    ///
    /// True iff an expiry is set and lies strictly before `now`.
    pub fn password_link_expired_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.password_link_expires, Some(expires) if expires < now)
    }
}
