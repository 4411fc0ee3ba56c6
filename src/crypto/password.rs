//! Salted password digests
//!
//! A login stores `hex(SHA-256(salt || utf8(password)))` together with the
//! 16 random salt bytes. Nothing else about the password is kept.

use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Length of the per-login salt in bytes
pub const SALT_LEN: usize = 16;

/// Length of the hex-encoded SHA-256 digest
pub const HASH_HEX_LEN: usize = 64;

/// Per-login salt
pub type Salt = [u8; SALT_LEN];

/// Generate a fresh salt from the operating system CSPRNG
///
/// # Panics
///
/// Panics if the OS entropy source is unavailable. There is no sensible
/// fallback for that, so it is not retried.
pub fn generate_salt() -> Salt {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Compute the lowercase hex SHA-256 digest of `salt || password`
pub fn hash_secret(salt: &Salt, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compare two hex digests without short-circuiting on the first difference
///
/// Inputs of different length never match.
pub fn digests_match(expected: &str, actual: &str) -> bool {
    expected.as_bytes().ct_eq(actual.as_bytes()).into()
}

/// Check that a stored digest has the shape produced by [`hash_secret`]
pub fn is_valid_digest(digest: &str) -> bool {
    digest.len() == HASH_HEX_LEN
        && digest
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_covers_salt_then_password() {
        let salt = [0x5au8; SALT_LEN];
        let mut input = salt.to_vec();
        input.extend_from_slice("ação".as_bytes());
        let expected = hex::encode(Sha256::digest(&input));

        assert_eq!(hash_secret(&salt, "ação"), expected);
    }

    #[test]
    fn test_digest_shape() {
        let digest = hash_secret(&generate_salt(), "hunter2");
        assert_eq!(digest.len(), HASH_HEX_LEN);
        assert!(is_valid_digest(&digest));
    }

    #[test]
    fn test_salt_changes_digest() {
        let a = hash_secret(&[1u8; SALT_LEN], "same");
        let b = hash_secret(&[2u8; SALT_LEN], "same");
        assert_ne!(a, b);
    }

    #[test]
    fn test_generated_salts_differ() {
        assert_ne!(generate_salt(), generate_salt());
    }

    #[test]
    fn test_digests_match() {
        let digest = hash_secret(&[7u8; SALT_LEN], "secret");
        assert!(digests_match(&digest, &digest.clone()));
        assert!(!digests_match(&digest, &hash_secret(&[7u8; SALT_LEN], "Secret")));
        assert!(!digests_match(&digest, ""));
        assert!(!digests_match(&digest, &digest[..10]));
    }

    #[test]
    fn test_is_valid_digest_rejects_bad_shapes() {
        assert!(!is_valid_digest(""));
        assert!(!is_valid_digest(&"A".repeat(HASH_HEX_LEN)));
        assert!(!is_valid_digest(&"g".repeat(HASH_HEX_LEN)));
        assert!(!is_valid_digest(&"a".repeat(HASH_HEX_LEN - 1)));
        assert!(is_valid_digest(&"0".repeat(HASH_HEX_LEN)));
    }
}
