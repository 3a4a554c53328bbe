//! Error types for userkit.

use thiserror::Error;

use crate::password::PasswordError;

/// Common error type for userkit.
#[derive(Error, Debug)]
pub enum UserKitError {
    /// Configuration error.
    ///
    /// Raised at startup when a required option is missing or invalid.
    /// A missing secret key is fatal and must prevent app initialization.
    #[error("configuration error: {0}")]
    Config(String),

    /// Domain-rule violation on the role/authorization model.
    ///
    /// Raised for example when attaching an unsaved or invalid role to a
    /// user. Callers translate this into a user-facing response.
    #[error("role error: {0}")]
    Role(String),

    /// Password hashing or verification failure.
    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for userkit operations.
pub type Result<T> = std::result::Result<T, UserKitError>;
