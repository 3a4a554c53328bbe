//! Role associations and the authorization view.
//!
//! The entity carries the persisted associations; the derived view always
//! unions in one synthetic default role. The two representations are kept
//! explicitly separate: [`User::persisted_roles`] is what storage sees,
//! [`effective_roles`] is what authorization sees.

use tracing::debug;

use crate::principal::RoleNeed;
use crate::role::Role;
use crate::schema::RoleSchema;
use crate::storage::ConflictSource;
use crate::{Result, UserKitError};

use super::User;

/// A membership query against a user's role view.
///
/// Implemented for handle strings (case-sensitive handle match) and for
/// role references (membership test).
pub trait RoleQuery {
    /// Whether the given role satisfies this query.
    fn matches(&self, role: &Role) -> bool;
}

impl RoleQuery for &str {
    fn matches(&self, role: &Role) -> bool {
        role.handle() == Some(*self)
    }
}

impl RoleQuery for &Role {
    fn matches(&self, role: &Role) -> bool {
        role == *self
    }
}

/// The derived role view: persisted associations plus the synthetic
/// default role, appended last.
///
/// Pure function; the default role is never persisted.
pub fn effective_roles(persisted: &[Role]) -> Vec<Role> {
    let mut roles = persisted.to_vec();
    roles.push(Role::default_user_role());
    roles
}

impl User {
    /// Attach a role to the user.
    ///
    /// The role is processed through [`RoleSchema`] (normalizing its
    /// fields) and must already have a persisted identity. On violation
    /// a domain error is returned and the association is unchanged.
    pub fn add_role(&mut self, mut role: Role, conflicts: &dyn ConflictSource) -> Result<()> {
        let schema = RoleSchema::new(conflicts);
        let result = schema.process(&mut role);
        if !result.ok() || role.id.is_none() {
            return Err(UserKitError::Role(
                "role must be valid and saved before adding to a user".to_string(),
            ));
        }

        debug!(user_id = ?self.id, role = ?role.handle(), "Role added");
        self.roles.push(role);
        Ok(())
    }

    /// Detach a role from the user. No-op when the role is not attached.
    pub fn remove_role(&mut self, role: &Role) {
        let before = self.roles.len();
        self.roles.retain(|r| r != role);
        if self.roles.len() != before {
            debug!(user_id = ?self.id, role = ?role.handle(), "Role removed");
        }
    }

    /// Whether the user's effective role view satisfies the query.
    ///
    /// Accepts a handle string or a role reference:
    ///
    /// ```
    /// use userkit::User;
    ///
    /// let user = User::new("a@b.com");
    /// assert!(user.has_role("user"));
    /// assert!(!user.has_role("admin"));
    /// ```
    pub fn has_role<Q: RoleQuery>(&self, query: Q) -> bool {
        self.effective_roles().iter().any(|role| query.matches(role))
    }

    /// The persisted role associations, without the synthetic default.
    pub fn persisted_roles(&self) -> &[Role] {
        &self.roles
    }

    /// The derived role view. See [`effective_roles`].
    pub fn effective_roles(&self) -> Vec<Role> {
        effective_roles(&self.roles)
    }

    /// Principal needs this user satisfies, one per effective role
    /// handle. Consumed by the authorization framework when building the
    /// request identity at login.
    pub fn provide_principal_needs(&self) -> Vec<RoleNeed> {
        self.effective_roles()
            .iter()
            .filter_map(|role| role.handle().map(RoleNeed::new))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::NoConflicts;

    #[test]
    fn test_fresh_user_has_only_default_role() {
        let user = User::new("a@b.com");
        assert!(user.persisted_roles().is_empty());

        let roles = user.effective_roles();
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].handle(), Some("user"));
    }

    #[test]
    fn test_has_default_role_by_handle() {
        let user = User::new("a@b.com");
        assert!(user.has_role("user"));
    }

    #[test]
    fn test_handle_match_is_case_sensitive() {
        let user = User::new("a@b.com");
        assert!(!user.has_role("USER"));
    }

    #[test]
    fn test_add_role() {
        let mut user = User::new("a@b.com");
        let role = Role::new("admin").with_id(1);

        user.add_role(role.clone(), &NoConflicts).unwrap();
        assert_eq!(user.persisted_roles().len(), 1);
        assert!(user.has_role("admin"));
        assert!(user.has_role(&role));
        // Default role appended after the persisted ones
        assert_eq!(user.effective_roles().len(), 2);
        assert_eq!(user.effective_roles()[1].handle(), Some("user"));
    }

    #[test]
    fn test_add_role_normalizes() {
        let mut user = User::new("a@b.com");
        let role = Role::new("  EDITOR  ").with_id(2);

        user.add_role(role, &NoConflicts).unwrap();
        assert!(user.has_role("editor"));
    }

    #[test]
    fn test_add_unsaved_role_is_domain_error() {
        let mut user = User::new("a@b.com");
        let role = Role::new("admin");

        let result = user.add_role(role, &NoConflicts);
        assert!(matches!(result, Err(UserKitError::Role(_))));
        // Association unchanged
        assert!(user.persisted_roles().is_empty());
    }

    #[test]
    fn test_add_invalid_role_is_domain_error() {
        let mut user = User::new("a@b.com");
        // Handle too short to validate, even though the role is saved
        let role = Role::new("ab").with_id(1);

        let result = user.add_role(role, &NoConflicts);
        assert!(matches!(result, Err(UserKitError::Role(_))));
        assert!(user.persisted_roles().is_empty());
    }

    #[test]
    fn test_remove_role() {
        let mut user = User::new("a@b.com");
        let role = Role::new("admin").with_id(1);
        user.add_role(role.clone(), &NoConflicts).unwrap();

        user.remove_role(&role);
        assert!(user.persisted_roles().is_empty());
        assert!(!user.has_role("admin"));
    }

    #[test]
    fn test_remove_absent_role_is_noop() {
        let mut user = User::new("a@b.com");
        user.remove_role(&Role::new("ghost").with_id(9));
        assert!(user.persisted_roles().is_empty());
    }

    #[test]
    fn test_effective_roles_is_pure() {
        let persisted = vec![Role::new("admin").with_id(1)];
        let view = effective_roles(&persisted);

        assert_eq!(view.len(), 2);
        assert_eq!(view[0].handle(), Some("admin"));
        assert_eq!(view[1].handle(), Some("user"));
        // Input untouched
        assert_eq!(persisted.len(), 1);
    }

    #[test]
    fn test_default_role_never_persisted() {
        let mut user = User::new("a@b.com");
        user.add_role(Role::new("admin").with_id(1), &NoConflicts)
            .unwrap();

        assert!(user
            .persisted_roles()
            .iter()
            .all(|role| role.handle() != Some("user")));
    }

    #[test]
    fn test_provide_principal_needs() {
        let mut user = User::new("a@b.com");
        user.add_role(Role::new("admin").with_id(1), &NoConflicts)
            .unwrap();

        let needs = user.provide_principal_needs();
        assert_eq!(needs.len(), 2);
        assert_eq!(needs[0].handle(), "admin");
        assert_eq!(needs[1].handle(), "user");
    }
}
