//! Plaintext passwords between the prompt and the hash
//!
//! `club login` reads passwords into a [`SecureString`]. The buffer is wiped
//! when the value is dropped, and neither `Debug` nor `Display` reveals it.

use std::fmt;
use std::ops::Deref;

use zeroize::Zeroizing;

/// A typed password, zeroed on drop
pub struct SecureString {
    inner: Zeroizing<String>,
}

impl SecureString {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            inner: Zeroizing::new(password.into()),
        }
    }

    /// Borrow the plaintext, e.g. to hash it
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl Deref for SecureString {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for SecureString {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<String> for SecureString {
    fn from(password: String) -> Self {
        Self::new(password)
    }
}

impl PartialEq for SecureString {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecureString(<{} bytes>)", self.inner.len())
    }
}

impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED {} bytes]", self.inner.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plaintext_is_reachable_for_hashing() {
        let password = SecureString::new("hunter2");
        assert_eq!(password.as_str(), "hunter2");
        assert_eq!(password.len(), 7);
    }

    #[test]
    fn test_confirmation_compares_contents() {
        let typed: SecureString = String::from("hunter2").into();
        assert_eq!(typed, SecureString::new("hunter2"));
        assert_ne!(typed, SecureString::new("hunter3"));
    }

    #[test]
    fn test_formatting_hides_password() {
        let password = SecureString::new("hunter2");

        let debug = format!("{:?}", password);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("SecureString"));

        let display = password.to_string();
        assert!(!display.contains("hunter2"));
        assert!(display.contains("REDACTED"));
    }
}
