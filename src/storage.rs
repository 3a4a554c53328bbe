//! Storage contract for uniqueness validation.
//!
//! Persistence itself lives outside this crate. The validation schemas
//! only need to ask the storage layer whether a value is already taken,
//! so that contract is a single trait the host application implements
//! over its ORM or repository layer.

/// Uniqueness queries against existing storage.
///
/// `exclude` carries the entity's own persisted id so that an entity
/// never conflicts with itself on update.
pub trait ConflictSource {
    /// Whether another user already owns this email address.
    fn email_taken(&self, email: &str, exclude: Option<i64>) -> bool;

    /// Whether another role already owns this handle.
    fn role_handle_taken(&self, handle: &str, exclude: Option<i64>) -> bool;
}

/// A [`ConflictSource`] that reports no conflicts.
///
/// Useful for contexts without storage, such as validating a role that is
/// known to be unique or exercising schemas in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoConflicts;

impl ConflictSource for NoConflicts {
    fn email_taken(&self, _email: &str, _exclude: Option<i64>) -> bool {
        false
    }

    fn role_handle_taken(&self, _handle: &str, _exclude: Option<i64>) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_conflicts_never_conflicts() {
        let source = NoConflicts;
        assert!(!source.email_taken("a@b.com", None));
        assert!(!source.role_handle_taken("admin", Some(1)));
    }

    #[test]
    fn test_trait_object_usage() {
        let source: &dyn ConflictSource = &NoConflicts;
        assert!(!source.email_taken("a@b.com", Some(42)));
    }
}
