//! Account-lockout policy.
//!
//! A small state machine over the failed-attempt counter and the lock
//! timestamp. All transitions are in-memory; the caller persists the
//! entity afterwards.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use super::User;

/// Consecutive failed logins that trigger a lock.
pub const FAILED_LOGIN_LIMIT: u32 = 10;

/// Minutes an automatic lock lasts.
pub const LOCKOUT_MINUTES: i64 = 30;

impl User {
    /// Whether the account is locked right now.
    ///
    /// See [`User::is_locked_at`].
    pub fn is_locked(&mut self) -> bool {
        self.is_locked_at(Utc::now())
    }

    /// Whether the account is locked at the given instant.
    ///
    /// A lock timestamp in the past means the lock has lapsed: it is
    /// cleared here as a side effect (self-healing read) and the call
    /// returns `false`.
    pub fn is_locked_at(&mut self, now: DateTime<Utc>) -> bool {
        match self.locked_until {
            Some(until) if until >= now => true,
            Some(_) => {
                self.unlock();
                false
            }
            None => false,
        }
    }

    /// Lock the account for the given number of minutes.
    pub fn lock(&mut self, minutes: i64) {
        self.locked_until = Some(Utc::now() + Duration::minutes(minutes));
        info!(user_id = ?self.id, minutes, "Account locked");
    }

    /// Clear the lock.
    pub fn unlock(&mut self) {
        self.locked_until = None;
        debug!(user_id = ?self.id, "Account unlocked");
    }

    /// Record one failed authentication attempt.
    ///
    /// The attempt that reaches the limit zeroes the counter and locks
    /// the account for [`LOCKOUT_MINUTES`] in the same call, so after
    /// exactly [`FAILED_LOGIN_LIMIT`] consecutive failures the account
    /// is locked and the counter reads 0.
    pub fn record_failed_attempt(&mut self) {
        match self.failed_logins {
            0 => self.failed_logins = 1,
            n if n < FAILED_LOGIN_LIMIT - 1 => self.failed_logins = n + 1,
            _ => {
                self.reset_counter();
                self.lock(LOCKOUT_MINUTES);
            }
        }
    }

    /// Reset the failed-attempt counter. Called on successful
    /// authentication.
    pub fn reset_counter(&mut self) {
        self.failed_logins = 0;
    }
}
