//! Login credential
//!
//! A credential ties an account identifier (an email) to a person and stores
//! a salted SHA-256 digest of the password. The plaintext never lives in this
//! type: it is hashed on the way in and dropped.
//!
//! There are two ways to build one:
//!
//! - [`Credential::new`] takes a plaintext password, draws a fresh salt and
//!   hashes it.
//! - [`Credential::from_persisted`] takes the stored digest and salt as they
//!   are. Stored digests are never hashed again.

use serde::Serialize;
use std::fmt;

use super::ids::{CredentialId, PersonId};
use crate::crypto::{digests_match, generate_salt, hash_secret, Salt};

/// A stored login
#[derive(Clone, Serialize)]
pub struct Credential {
    id: Option<CredentialId>,
    identifier: String,
    #[serde(skip)]
    secret_hash: String,
    #[serde(skip)]
    salt: Salt,
    subject: PersonId,
}

impl Credential {
    /// Issue a credential for `subject`, hashing `plaintext_secret` with a new salt
    ///
    /// Emptiness of the identifier or the secret is the caller's concern.
    pub fn new(identifier: impl Into<String>, plaintext_secret: &str, subject: PersonId) -> Self {
        let salt = generate_salt();
        Self {
            id: None,
            identifier: identifier.into(),
            secret_hash: hash_secret(&salt, plaintext_secret),
            salt,
            subject,
        }
    }

    /// Rebuild a credential from its stored columns without rehashing
    pub fn from_persisted(
        id: CredentialId,
        identifier: impl Into<String>,
        secret_hash: impl Into<String>,
        salt: Salt,
        subject: PersonId,
    ) -> Self {
        Self {
            id: Some(id),
            identifier: identifier.into(),
            secret_hash: secret_hash.into(),
            salt,
            subject,
        }
    }

    /// Check an attempted password against the stored digest
    ///
    /// A mismatch is a normal outcome and simply returns `false`.
    pub fn verify(&self, attempted_secret: &str) -> bool {
        digests_match(&self.secret_hash, &hash_secret(&self.salt, attempted_secret))
    }

    /// Check both the identifier and the password
    pub fn authenticate(&self, identifier: &str, secret: &str) -> bool {
        // Evaluate both so a wrong identifier costs the same as a wrong password.
        let identifier_ok = self.identifier == identifier;
        let secret_ok = self.verify(secret);
        identifier_ok && secret_ok
    }

    /// Replace the password, keeping the original salt
    ///
    /// The salt is kept for compatibility with rows written before rotation
    /// existed; the caller persists the result.
    pub fn rotate_secret(&mut self, new_plaintext_secret: &str) -> &mut Self {
        self.secret_hash = hash_secret(&self.salt, new_plaintext_secret);
        self
    }

    /// Row id, unset until saved
    pub fn id(&self) -> Option<CredentialId> {
        self.id
    }

    /// Record the row id assigned by storage
    pub fn set_id(&mut self, id: CredentialId) {
        self.id = Some(id);
    }

    /// Account handle (email)
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Change the account handle
    pub fn set_identifier(&mut self, identifier: impl Into<String>) {
        self.identifier = identifier.into();
    }

    /// Lowercase hex SHA-256 digest of `salt || password`
    pub fn secret_hash(&self) -> &str {
        &self.secret_hash
    }

    /// The 16-byte salt fixed at creation
    pub fn salt(&self) -> &Salt {
        &self.salt
    }

    /// The person this credential authenticates
    pub fn subject(&self) -> PersonId {
        self.subject
    }

    /// Reassign the credential to another person
    pub fn set_subject(&mut self, subject: PersonId) {
        self.subject = subject;
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("id", &self.id)
            .field("identifier", &self.identifier)
            .field("secret_hash", &"[REDACTED]")
            .field("salt", &"[REDACTED]")
            .field("subject", &self.subject)
            .finish()
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{is_valid_digest, HASH_HEX_LEN, SALT_LEN};

    fn subject() -> PersonId {
        PersonId::new(1)
    }

    #[test]
    fn test_verify_original_secret() {
        for secret in ["hunter2", "", "correct horse battery staple", "ação ✓"] {
            let credential = Credential::new("a@x.com", secret, subject());
            assert!(credential.verify(secret), "secret {:?} should verify", secret);
        }
    }

    #[test]
    fn test_verify_rejects_other_secret() {
        let credential = Credential::new("a@x.com", "first", subject());
        assert!(!credential.verify("second"));
        assert!(!credential.verify("first "));
    }

    #[test]
    fn test_hunter2_scenario() {
        let credential = Credential::new("a@x.com", "hunter2", PersonId::new(1));
        assert!(credential.verify("hunter2"));
        assert!(!credential.verify("Hunter2"));
        assert!(!credential.verify(""));
    }

    #[test]
    fn test_salt_is_fresh_per_credential() {
        let a = Credential::new("a@x.com", "same", subject());
        let b = Credential::new("a@x.com", "same", subject());

        assert_eq!(a.salt().len(), SALT_LEN);
        assert_ne!(a.salt(), b.salt());
        assert_ne!(a.secret_hash(), b.secret_hash());
    }

    #[test]
    fn test_hash_is_lowercase_hex() {
        let credential = Credential::new("a@x.com", "hunter2", subject());
        assert_eq!(credential.secret_hash().len(), HASH_HEX_LEN);
        assert!(is_valid_digest(credential.secret_hash()));
    }

    #[test]
    fn test_new_credential_is_unsaved() {
        let credential = Credential::new("a@x.com", "hunter2", subject());
        assert!(credential.id().is_none());
        assert_eq!(credential.identifier(), "a@x.com");
        assert_eq!(credential.subject(), subject());
    }

    #[test]
    fn test_rotation_keeps_salt() {
        let mut credential = Credential::new("a@x.com", "old", subject());
        let salt_before = *credential.salt();
        let hash_before = credential.secret_hash().to_string();

        credential.rotate_secret("new");

        assert_eq!(credential.salt(), &salt_before);
        assert_ne!(credential.secret_hash(), hash_before);
        assert!(credential.verify("new"));
        assert!(!credential.verify("old"));
    }

    #[test]
    fn test_reconstruction_does_not_rehash() {
        let original = Credential::new("a@x.com", "hunter2", subject());

        let restored = Credential::from_persisted(
            CredentialId::new(5),
            original.identifier(),
            original.secret_hash(),
            *original.salt(),
            original.subject(),
        );

        assert_eq!(restored.id(), Some(CredentialId::new(5)));
        assert_eq!(restored.secret_hash(), original.secret_hash());
        assert!(restored.verify("hunter2"));
        assert!(!restored.verify("hunter3"));
    }

    #[test]
    fn test_authenticate_checks_identifier() {
        let credential = Credential::new("a@x.com", "hunter2", subject());
        assert!(credential.authenticate("a@x.com", "hunter2"));
        assert!(!credential.authenticate("b@x.com", "hunter2"));
        assert!(!credential.authenticate("a@x.com", "wrong"));
    }

    #[test]
    fn test_reassignment_keeps_secret() {
        let mut credential = Credential::new("a@x.com", "hunter2", subject());
        credential.set_identifier("b@x.com");
        credential.set_subject(PersonId::new(2));

        assert_eq!(credential.subject(), PersonId::new(2));
        assert!(credential.authenticate("b@x.com", "hunter2"));
    }

    #[test]
    fn test_secret_material_not_exposed() {
        let credential = Credential::new("a@x.com", "hunter2", subject());

        let debug = format!("{:?}", credential);
        assert!(!debug.contains(credential.secret_hash()));
        assert!(!debug.contains("hunter2"));

        let json = serde_json::to_value(&credential).unwrap();
        assert_eq!(json["identifier"], "a@x.com");
        assert!(json.get("secret_hash").is_none());
        assert!(json.get("salt").is_none());
    }
}
