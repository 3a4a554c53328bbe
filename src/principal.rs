//! Principal needs for the external authorization framework.
//!
//! A need is a capability marker tagged with a role handle. The session
//! layer collects the needs a user satisfies at login and checks them
//! against protected resources; this crate only produces the markers.

use std::fmt;

use serde::Serialize;

/// A role-handle-tagged capability marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RoleNeed {
    handle: String,
}

impl RoleNeed {
    /// Create a need for the given role handle.
    pub fn new(handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
        }
    }

    /// The role handle this need is tagged with.
    pub fn handle(&self) -> &str {
        &self.handle
    }
}

impl fmt::Display for RoleNeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "role:{}", self.handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_need_handle() {
        let need = RoleNeed::new("admin");
        assert_eq!(need.handle(), "admin");
    }

    #[test]
    fn test_role_need_equality() {
        assert_eq!(RoleNeed::new("admin"), RoleNeed::new("admin"));
        assert_ne!(RoleNeed::new("admin"), RoleNeed::new("user"));
    }

    #[test]
    fn test_role_need_display() {
        assert_eq!(RoleNeed::new("editor").to_string(), "role:editor");
    }
}
