//! Email-confirmation lifecycle.
//!
//! Three states: a fresh account with an unconfirmed live email, a
//! confirmed account with a staged change pending, and a confirmed
//! account with no outstanding link. Setting the email moves between
//! them; expiry checks are pure and never mutate state (callers branch
//! on them).

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::token::generate_link_token;

use super::User;

impl User {
    /// Set the email address, normalizing to lowercase.
    ///
    /// The first assignment stores the value as the live email. Any
    /// later assignment stages the value in `email_new` pending
    /// confirmation; the live value only changes in
    /// [`User::confirm_email`]. Setting the identical current value is
    /// a no-op. Both real transitions generate a fresh confirmation
    /// link.
    pub fn set_email(&mut self, email: &str) {
        let email = email.to_lowercase();
        if email == self.email {
            return;
        }

        if self.email.is_empty() {
            self.email = email;
        } else {
            self.email_new = Some(email);
        }
        self.require_email_confirmation();
    }

    /// Mark the email as unconfirmed and issue a confirmation link.
    ///
    /// The link expires after the entity's configured hour count
    /// (24 by default).
    pub fn require_email_confirmation(&mut self) {
        self.email_confirmed = false;
        self.email_link = Some(generate_link_token());
        self.email_link_expires = Some(Utc::now() + Duration::hours(self.email_link_expires_in));
        debug!(user_id = ?self.id, "Email confirmation required");
    }

    /// Confirm the email.
    ///
    /// Promotes a staged new email to the live value if one is pending,
    /// marks the account confirmed, and clears the link, expiry and
    /// staged value.
    pub fn confirm_email(&mut self) {
        if let Some(email_new) = self.email_new.take() {
            self.email = email_new;
        }

        self.email_confirmed = true;
        self.email_link = None;
        self.email_link_expires = None;
        debug!(user_id = ?self.id, "Email confirmed");
    }

    /// Cancel a pending email change.
    ///
    /// No-op when nothing is staged. Otherwise discards the staged
    /// value, clears the link and expiry, and treats the current live
    /// email as confirmed again.
    pub fn cancel_email_change(&mut self) {
        if self.email_new.is_none() {
            return;
        }

        self.email_new = None;
        self.email_confirmed = true;
        self.email_link = None;
        self.email_link_expires = None;
        debug!(user_id = ?self.id, "Email change cancelled");
    }

    /// Whether the confirmation link has expired.
    ///
    /// See [`User::email_link_expired_at`].
    pub fn email_link_expired(&self) -> bool {
        self.email_link_expired_at(Utc::now())
    }

    /// Whether the confirmation link has expired at the given instant.
    ///
    /// True iff an expiry is set and lies strictly before `now`. Pure
    /// check; expiry never mutates the entity.
    pub fn email_link_expired_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.email_link_expires, Some(expires) if expires < now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_set_stores_live_email() {
        let user = User::new("A@B.com");
        assert_eq!(user.email(), "a@b.com");
        assert!(user.email_new().is_none());
        assert!(!user.email_confirmed());
        assert!(user.email_link().is_some());
        assert!(user.email_link_expires().is_some());
    }

    #[test]
    fn test_second_set_stages_change() {
        let mut user = User::new("a@b.com");
        user.confirm_email();

        user.set_email("New@Example.com");
        // Live value untouched; new value staged lowercased
        assert_eq!(user.email(), "a@b.com");
        assert_eq!(user.email_new(), Some("new@example.com"));
        assert!(!user.email_confirmed());
        assert!(user.email_link().is_some());
    }

    #[test]
    fn test_identical_value_is_noop() {
        let mut user = User::new("a@b.com");
        let link = user.email_link().unwrap().to_string();

        user.set_email("a@b.com");
        // No staged change, no new confirmation link
        assert!(user.email_new().is_none());
        assert_eq!(user.email_link(), Some(link.as_str()));
    }

    #[test]
    fn test_identical_value_different_case_is_noop() {
        let mut user = User::new("a@b.com");
        let link = user.email_link().unwrap().to_string();

        user.set_email("A@B.COM");
        assert!(user.email_new().is_none());
        assert_eq!(user.email_link(), Some(link.as_str()));
    }

    #[test]
    fn test_require_confirmation_issues_fresh_link() {
        let mut user = User::new("a@b.com");
        let first = user.email_link().unwrap().to_string();

        user.require_email_confirmation();
        let second = user.email_link().unwrap();
        assert_eq!(second.len(), 50);
        assert_ne!(first, second);
        assert!(!user.email_confirmed());
    }

    #[test]
    fn test_confirm_email_without_staged_change() {
        let mut user = User::new("a@b.com");
        user.confirm_email();

        assert_eq!(user.email(), "a@b.com");
        assert!(user.email_confirmed());
        assert!(user.email_link().is_none());
        assert!(user.email_link_expires().is_none());
    }

    #[test]
    fn test_confirm_email_promotes_staged_value() {
        let mut user = User::new("a@b.com");
        user.confirm_email();
        user.set_email("new@example.com");

        user.confirm_email();
        assert_eq!(user.email(), "new@example.com");
        assert!(user.email_new().is_none());
        assert!(user.email_confirmed());
        assert!(user.email_link().is_none());
        assert!(user.email_link_expires().is_none());
    }

    #[test]
    fn test_cancel_email_change() {
        let mut user = User::new("a@b.com");
        user.confirm_email();
        user.set_email("new@example.com");

        user.cancel_email_change();
        // Live value untouched; staged change and link discarded
        assert_eq!(user.email(), "a@b.com");
        assert!(user.email_new().is_none());
        assert!(user.email_confirmed());
        assert!(user.email_link().is_none());
        assert!(user.email_link_expires().is_none());
    }

    #[test]
    fn test_cancel_without_pending_change_is_noop() {
        let mut user = User::new("a@b.com");
        let link = user.email_link().unwrap().to_string();

        user.cancel_email_change();
        // Still unconfirmed, link untouched
        assert!(!user.email_confirmed());
        assert_eq!(user.email_link(), Some(link.as_str()));
    }

    #[test]
    fn test_email_link_expiry_check_is_pure() {
        let user = User::new("a@b.com");
        let expires = user.email_link_expires().unwrap();

        assert!(!user.email_link_expired_at(expires));
        assert!(user.email_link_expired_at(expires + Duration::seconds(1)));
        // State untouched by the checks
        assert_eq!(user.email_link_expires(), Some(expires));
    }

    #[test]
    fn test_email_link_expired_without_link() {
        let mut user = User::new("a@b.com");
        user.confirm_email();
        assert!(!user.email_link_expired());
    }
}
