//! Configuration module for userkit.
//!
//! The configuration object is always passed explicitly into constructors
//! and operations; nothing in this crate reads ambient global state.

use serde::Deserialize;
use std::path::Path;

use crate::{Result, UserKitError};

/// Default number of hours a confirmation or recovery link stays valid.
pub const DEFAULT_LINK_EXPIRES_HOURS: i64 = 24;

/// Per-template email subject lines.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailSubjects {
    /// Subject for the welcome message.
    #[serde(default = "default_welcome_subject")]
    pub welcome: String,
    /// Subject for the email confirmation message.
    #[serde(default = "default_confirm_subject")]
    pub confirm_email: String,
    /// Subject for the email change confirmation message.
    #[serde(default = "default_change_subject")]
    pub email_change: String,
    /// Subject for the password recovery message.
    #[serde(default = "default_recover_subject")]
    pub password_reset: String,
}

fn default_welcome_subject() -> String {
    "Welcome to our site!".to_string()
}

fn default_confirm_subject() -> String {
    "Please confirm your email".to_string()
}

fn default_change_subject() -> String {
    "Confirm your new email".to_string()
}

fn default_recover_subject() -> String {
    "Reset your password".to_string()
}

impl Default for EmailSubjects {
    fn default() -> Self {
        Self {
            welcome: default_welcome_subject(),
            confirm_email: default_confirm_subject(),
            email_change: default_change_subject(),
            password_reset: default_recover_subject(),
        }
    }
}

/// User-account module configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct UserConfig {
    /// Secret key for signed tokens. Required; there is no default.
    #[serde(default)]
    pub jwt_secret: String,
    /// Whether new accounts must confirm their email before use.
    #[serde(default = "default_require_confirmation")]
    pub require_confirmation: bool,
    /// Whether a welcome message is sent after registration.
    #[serde(default = "default_send_welcome_message")]
    pub send_welcome_message: bool,
    /// Whether user profiles are publicly visible.
    #[serde(default)]
    pub public_profiles: bool,
    /// Subject lines for outgoing account emails.
    #[serde(default)]
    pub email_subjects: EmailSubjects,
    /// Hours an email confirmation link stays valid.
    #[serde(default = "default_link_expires_hours")]
    pub email_link_expires_hours: i64,
    /// Hours a password recovery link stays valid.
    #[serde(default = "default_link_expires_hours")]
    pub password_link_expires_hours: i64,
}

fn default_require_confirmation() -> bool {
    true
}

fn default_send_welcome_message() -> bool {
    true
}

fn default_link_expires_hours() -> i64 {
    DEFAULT_LINK_EXPIRES_HOURS
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            require_confirmation: default_require_confirmation(),
            send_welcome_message: default_send_welcome_message(),
            public_profiles: false,
            email_subjects: EmailSubjects::default(),
            email_link_expires_hours: default_link_expires_hours(),
            password_link_expires_hours: default_link_expires_hours(),
        }
    }
}

impl UserConfig {
    /// Create a configuration with the given secret and defaults elsewhere.
    pub fn with_secret(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: UserConfig = toml::from_str(&content)
            .map_err(|e| UserKitError::Config(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// A missing or empty secret key is a fatal startup error.
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.trim().is_empty() {
            return Err(UserKitError::Config(
                "jwt secret is not configured".to_string(),
            ));
        }
        Ok(())
    }
}
