use rand::rngs::OsRng;
use rand::RngCore;

/// Entropy of a refresh token in bytes (256 bits).
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Generate an opaque refresh token.
///
/// 32 bytes from the operating system CSPRNG, lowercase hex encoded (64 characters,
/// URL safe). Uniqueness comes from the entropy; callers do not check for collisions.
pub fn generate() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_generate_format() {
        let token = generate();

        assert_eq!(token.len(), REFRESH_TOKEN_BYTES * 2);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_generate_distinct() {
        let tokens: HashSet<String> = (0..10_000).map(|_| generate()).collect();
        assert_eq!(tokens.len(), 10_000);
    }
}
