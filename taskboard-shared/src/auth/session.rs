/// Session token generation
///
/// Session tokens are opaque: 32 bytes from the operating system's CSPRNG,
/// hex-encoded to 64 characters. All meaning lives in the `sessions`
/// table row the token points at.

use rand::rngs::OsRng;
use rand::RngCore;

/// Number of random bytes in a session token
pub const TOKEN_BYTES: usize = 32;

/// Length of the encoded token string
pub const TOKEN_LENGTH: usize = TOKEN_BYTES * 2;

/// Generates a new session token
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_length() {
        assert_eq!(generate_token().len(), TOKEN_LENGTH);
    }

    #[test]
    fn test_token_is_lowercase_hex() {
        let token = generate_token();
        assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_tokens_are_unique() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
    }
}
