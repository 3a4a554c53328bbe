//! Opaque link-token generation.
//!
//! Tokens are fixed-length random alphanumeric strings embedded in email
//! confirmation and password recovery URLs. They carry no structure; the
//! expiry lives next to the token on the user entity.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of email confirmation and password recovery link tokens.
pub const LINK_TOKEN_LENGTH: usize = 50;

/// Generate a random alphanumeric string of the given length.
pub fn generate_token(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Generate a link token of the standard length.
pub fn generate_link_token() -> String {
    generate_token(LINK_TOKEN_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_length() {
        assert_eq!(generate_token(30).len(), 30);
        assert_eq!(generate_link_token().len(), LINK_TOKEN_LENGTH);
    }

    #[test]
    fn test_token_is_alphanumeric() {
        let token = generate_link_token();
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_tokens_differ() {
        // Statistically certain for 50-char alphanumeric tokens
        assert_ne!(generate_link_token(), generate_link_token());
    }

    #[test]
    fn test_zero_length_token() {
        assert!(generate_token(0).is_empty());
    }
}
