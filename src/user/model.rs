//! User entity: fields, construction and session-gating signals.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::{UserConfig, DEFAULT_LINK_EXPIRES_HOURS};
use crate::password::PasswordError;
use crate::role::Role;

/// A user account.
///
/// Represents a basic user entity with the functionality to register via
/// email and password (or an OAuth provider, in which case no local
/// password is stored), log in, recover a password, and be authorized
/// and authenticated.
///
/// Entities are request-scoped: each request loads its own copy from
/// storage and persists it at the end; nothing here is shared across
/// requests.
#[derive(Debug, Clone)]
pub struct User {
    /// Surrogate identity, assigned by storage on persistence.
    pub id: Option<i64>,
    /// Creation timestamp, set once at construction.
    pub(crate) created: DateTime<Utc>,

    // locking
    pub(crate) failed_logins: u32,
    pub(crate) locked_until: Option<DateTime<Utc>>,

    // email
    pub(crate) email: String,
    pub(crate) email_confirmed: bool,
    pub(crate) email_new: Option<String>,
    pub(crate) email_link: Option<String>,
    pub(crate) email_link_expires: Option<DateTime<Utc>>,

    // password
    pub(crate) password: Option<String>,
    pub(crate) password_link: Option<String>,
    pub(crate) password_link_expires: Option<DateTime<Utc>>,

    // persisted role associations
    pub(crate) roles: Vec<Role>,

    // link validity windows, in hours
    pub(crate) email_link_expires_in: i64,
    pub(crate) password_link_expires_in: i64,
}

impl User {
    fn blank(email_link_expires_in: i64, password_link_expires_in: i64) -> Self {
        Self {
            id: None,
            created: Utc::now(),
            failed_logins: 0,
            locked_until: None,
            email: String::new(),
            email_confirmed: false,
            email_new: None,
            email_link: None,
            email_link_expires: None,
            password: None,
            password_link: None,
            password_link_expires: None,
            roles: Vec::new(),
            email_link_expires_in,
            password_link_expires_in,
        }
    }

    /// Create a user with the given email and default link expiry windows.
    ///
    /// Stamps `created`, starts unconfirmed with a zero failure counter,
    /// and generates the initial email confirmation link.
    ///
    /// # Examples
    ///
    /// ```
    /// use userkit::User;
    ///
    /// let user = User::new("A@B.com");
    /// assert_eq!(user.email(), "a@b.com");
    /// assert!(!user.email_confirmed());
    /// assert_eq!(user.email_link().unwrap().len(), 50);
    /// ```
    pub fn new(email: &str) -> Self {
        let mut user = Self::blank(DEFAULT_LINK_EXPIRES_HOURS, DEFAULT_LINK_EXPIRES_HOURS);
        user.set_email(email);
        user
    }

    /// Create a user with link expiry windows taken from configuration.
    pub fn from_config(email: &str, config: &UserConfig) -> Self {
        let mut user = Self::blank(
            config.email_link_expires_hours,
            config.password_link_expires_hours,
        );
        user.set_email(email);
        user
    }

    /// Create a user with an email and a local password in one step.
    ///
    /// This is the registration path: the email gets a confirmation link
    /// and the password is hashed before storage.
    pub fn register(email: &str, password: &str) -> Result<Self, PasswordError> {
        let mut user = Self::new(email);
        user.set_password(password)?;
        Ok(user)
    }

    /// Creation timestamp.
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Consecutive failed login attempts since the last reset.
    pub fn failed_logins(&self) -> u32 {
        self.failed_logins
    }

    /// Timestamp the account is locked until, if any.
    pub fn locked_until(&self) -> Option<DateTime<Utc>> {
        self.locked_until
    }

    /// The live email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Whether the live email has been confirmed.
    pub fn email_confirmed(&self) -> bool {
        self.email_confirmed
    }

    /// The staged new email awaiting confirmation, if any.
    pub fn email_new(&self) -> Option<&str> {
        self.email_new.as_deref()
    }

    /// The outstanding email confirmation token, if any.
    pub fn email_link(&self) -> Option<&str> {
        self.email_link.as_deref()
    }

    /// Expiry of the outstanding email confirmation token, if any.
    pub fn email_link_expires(&self) -> Option<DateTime<Utc>> {
        self.email_link_expires
    }

    /// The stored password hash, if a local password is set.
    pub fn password_hash(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// The outstanding password recovery token, if any.
    pub fn password_link(&self) -> Option<&str> {
        self.password_link.as_deref()
    }

    /// Expiry of the outstanding password recovery token, if any.
    pub fn password_link_expires(&self) -> Option<DateTime<Utc>> {
        self.password_link_expires
    }

    /// Stable identity string for the session framework.
    ///
    /// `None` until the account has been persisted.
    pub fn get_id(&self) -> Option<String> {
        self.id.map(|id| id.to_string())
    }

    /// A loaded account is always authenticated.
    pub fn is_authenticated(&self) -> bool {
        true
    }

    /// A loaded account is never anonymous.
    pub fn is_anonymous(&self) -> bool {
        false
    }

    /// Whether the account may be used right now.
    ///
    /// Takes `&mut self` because a stale lock is cleared on read.
    pub fn is_active(&mut self) -> bool {
        !self.is_locked()
    }

    /// Build a serializable view of the account.
    ///
    /// The email is obfuscated for display. Takes `&mut self` because
    /// the lock state is read through the self-healing check.
    pub fn to_view(&mut self, include_roles: bool) -> UserView {
        let locked = self.is_locked();
        UserView {
            id: self.id,
            created: self.created,
            failed_logins: self.failed_logins,
            locked,
            locked_until: self.locked_until,
            email: self.email_secure(),
            email_confirmed: self.email_confirmed,
            roles: if include_roles {
                self.effective_roles()
            } else {
                Vec::new()
            },
        }
    }

    /// Overwrite the stored live email without touching the
    /// confirmation lifecycle. Used by the validation schemas to write
    /// back normalized values.
    pub(crate) fn store_email(&mut self, email: String) {
        self.email = email;
    }

    /// Overwrite the staged email without touching the confirmation
    /// lifecycle.
    pub(crate) fn store_email_new(&mut self, email_new: Option<String>) {
        self.email_new = email_new;
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<User id={:?} email=\"{}\">", self.id, self.email_secure())
    }
}

/// Serializable representation of a user account.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    /// Surrogate identity, if persisted.
    pub id: Option<i64>,
    /// Creation timestamp.
    pub created: DateTime<Utc>,
    /// Failed login counter.
    pub failed_logins: u32,
    /// Whether the account is currently locked.
    pub locked: bool,
    /// Lock expiry, if locked.
    pub locked_until: Option<DateTime<Utc>>,
    /// Obfuscated email for display.
    pub email: String,
    /// Whether the email is confirmed.
    pub email_confirmed: bool,
    /// Effective roles, when requested.
    pub roles: Vec<Role>,
}
