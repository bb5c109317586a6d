//! Password value object - salted hashing and verification.
//!
//! Each password is hashed with a salt generated for its owner. The salt is
//! stored next to the hash so verification can recompute the digest for a
//! candidate and compare the two.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use subtle::ConstantTimeEq;

use crate::error::{DomainError, DomainResult};

/// Hashed password together with the salt it was derived from.
#[derive(Clone)]
pub struct Password {
    encrypted: String,
    salt: String,
}

// Don't expose hash material in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("encrypted", &"[REDACTED]")
            .field("salt", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash `plain_text` under a freshly generated salt.
    ///
    /// Length rules are not checked here; see [`crate::validation`].
    pub fn new(plain_text: &str) -> DomainResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let encrypted = Self::encrypt(plain_text, salt.as_str())?;
        Ok(Self {
            encrypted,
            salt: salt.as_str().to_string(),
        })
    }

    /// Rebuild from persisted columns.
    pub fn from_parts(encrypted: String, salt: String) -> Self {
        Self { encrypted, salt }
    }

    pub fn encrypted(&self) -> &str {
        &self.encrypted
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// Consume and return `(encrypted, salt)` for storage.
    pub fn into_parts(self) -> (String, String) {
        (self.encrypted, self.salt)
    }

    /// Verify a plain text password against this hash.
    pub fn verify(&self, plain_text: &str) -> bool {
        Self::matches(plain_text, &self.encrypted, &self.salt)
    }

    /// Recompute the salted hash of `plain_text` and compare it with
    /// `encrypted` in constant time. Malformed salts never match.
    pub fn matches(plain_text: &str, encrypted: &str, salt: &str) -> bool {
        match Self::encrypt(plain_text, salt) {
            Ok(candidate) => candidate.as_bytes().ct_eq(encrypted.as_bytes()).into(),
            Err(_) => false,
        }
    }

    /// Argon2 digest of `plain_text` keyed by `salt`, in PHC string form.
    /// Deterministic for a given salt and password.
    fn encrypt(plain_text: &str, salt: &str) -> DomainResult<String> {
        let salt = SaltString::from_b64(salt)
            .map_err(|e| DomainError::password(format!("Invalid salt: {}", e)))?;
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::password(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.encrypted == other.encrypted && self.salt == other.salt
    }
}

impl Eq for Password {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let password = Password::new("foobar").unwrap();

        assert!(password.verify("foobar"));
        assert!(!password.verify("invalid"));
    }

    #[test]
    fn test_hash_never_contains_plain_text() {
        let password = Password::new("foobar").unwrap();

        assert!(!password.encrypted().is_empty());
        assert_ne!(password.encrypted(), "foobar");
        assert!(!password.encrypted().contains("foobar"));
    }

    #[test]
    fn test_password_from_parts() {
        let (encrypted, salt) = Password::new("secret1").unwrap().into_parts();

        let restored = Password::from_parts(encrypted, salt);
        assert!(restored.verify("secret1"));
    }

    #[test]
    fn test_same_password_different_salts() {
        let pass1 = Password::new("samepass").unwrap();
        let pass2 = Password::new("samepass").unwrap();

        assert_ne!(pass1.salt(), pass2.salt());
        assert_ne!(pass1.encrypted(), pass2.encrypted());
        assert!(pass1.verify("samepass"));
        assert!(pass2.verify("samepass"));
    }

    #[test]
    fn test_hash_is_deterministic_for_salt() {
        let password = Password::new("foobar").unwrap();

        assert!(Password::matches("foobar", password.encrypted(), password.salt()));
    }

    #[test]
    fn test_malformed_salt_never_matches() {
        let password = Password::new("foobar").unwrap();

        assert!(!Password::matches("foobar", password.encrypted(), "!"));
    }
}
