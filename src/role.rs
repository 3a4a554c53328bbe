//! Role entity for the authorization model.
//!
//! Roles are named permission groups attached to users through a
//! many-to-many association owned by the external storage layer. The
//! handle is the primary lookup key for authorization checks and is
//! always normalized to lowercase on write.

use std::fmt;

use serde::Serialize;

/// Handle of the implicit default role every account holds.
pub const DEFAULT_ROLE_HANDLE: &str = "user";

/// A named permission role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Role {
    /// Surrogate identity, assigned by storage on persistence.
    pub id: Option<i64>,
    /// Unique lowercase slug. Normalized through [`Role::set_handle`].
    handle: Option<String>,
    /// Optional display title.
    pub title: Option<String>,
    /// Optional description.
    pub description: Option<String>,
}

impl Role {
    /// Create a role with the given handle.
    ///
    /// The handle is lowercased; a role created with `"ADMIN"` reads back
    /// as `"admin"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use userkit::Role;
    ///
    /// let role = Role::new("ADMIN");
    /// assert_eq!(role.handle(), Some("admin"));
    /// assert!(role.id.is_none());
    /// ```
    pub fn new(handle: impl Into<String>) -> Self {
        let mut role = Self::default();
        role.set_handle(Some(handle.into()));
        role
    }

    /// Set the display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark the role as persisted under the given id.
    ///
    /// Only storage adapters should assign ids; a role must be saved
    /// before it can be attached to a user.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// The role handle, if set.
    pub fn handle(&self) -> Option<&str> {
        self.handle.as_deref()
    }

    /// Set the handle, normalizing to lowercase.
    ///
    /// `None` stays `None`; a missing handle is never stringified.
    pub fn set_handle(&mut self, handle: Option<String>) {
        self.handle = handle.map(|h| h.to_lowercase());
    }

    /// The synthetic default role granted to every account.
    ///
    /// Never persisted; it is appended to the derived role view at read
    /// time.
    pub fn default_user_role() -> Self {
        Role::new(DEFAULT_ROLE_HANDLE)
            .with_title("User role")
            .with_description("All registered users get this role by default")
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Role id={:?} handle={:?} title={:?}>",
            self.id, self.handle, self.title
        )
    }
}
