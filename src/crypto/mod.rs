//! Cryptographic functions for club-registry
//!
//! Provides the salted SHA-256 password digest used by logins, and a
//! zeroizing wrapper for plaintext passwords read from the terminal.

pub mod password;
pub mod secure_memory;

pub use password::{digests_match, generate_salt, hash_secret, is_valid_digest, Salt, HASH_HEX_LEN, SALT_LEN};
pub use secure_memory::SecureString;
