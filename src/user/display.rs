//! Display helpers: email obfuscation and Gravatar URLs.
//!
//! Pure string construction; no network calls are made here.

use sha2::{Digest, Sha256};

use super::User;

/// Obfuscate an email address for UI display.
///
/// The first and last characters of the local part are kept and interior
/// alphanumerics are masked; punctuation shows through. Local parts of
/// two characters or fewer are fully masked.
///
/// # Examples
///
/// ```
/// use userkit::user::obfuscate_email;
///
/// assert_eq!(obfuscate_email("john.doe@example.com"), "j***.**e@example.com");
/// assert_eq!(obfuscate_email("ab@example.com"), "**@example.com");
/// ```
pub fn obfuscate_email(email: &str) -> String {
    let Some((local, host)) = email.split_once('@') else {
        return "*".repeat(email.chars().count());
    };

    let len = local.chars().count();
    if len <= 2 {
        return format!("{}@{host}", "*".repeat(len));
    }

    let first = local.chars().next().unwrap();
    let last = local.chars().last().unwrap();
    let interior: String = local
        .chars()
        .skip(1)
        .take(len - 2)
        .map(|c| if c.is_ascii_alphanumeric() { '*' } else { c })
        .collect();

    format!("{first}{interior}{last}@{host}")
}

/// Build a deterministic Gravatar URL for an email address.
///
/// The address is trimmed and lowercased before hashing, per the
/// Gravatar contract.
pub fn gravatar_url(email: &str, size: u32) -> String {
    let digest = Sha256::digest(email.trim().to_lowercase().as_bytes());
    let hash: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    format!("https://www.gravatar.com/avatar/{hash}?d=mm&s={size}")
}

impl User {
    /// Obfuscated form of the live email for UI display.
    pub fn email_secure(&self) -> String {
        obfuscate_email(&self.email)
    }

    /// Gravatar URL for the live email.
    pub fn gravatar(&self, size: u32) -> String {
        gravatar_url(&self.email, size)
    }
}
