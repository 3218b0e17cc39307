//! Argon2id password digests.
//!
//! Accounts never hold plaintext credentials. [`PasswordHash::derive`] salts
//! and hashes a password into a PHC string (`$argon2id$v=19$...`) which is
//! what the `accounts.password` column stores; [`PasswordHash::verify`]
//! checks a candidate against it.

use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Errors raised while deriving or parsing a digest.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// Hashing the plaintext failed.
    #[error("failed to hash password: {message}")]
    Hash {
        /// Underlying cause.
        message: String,
    },
    /// A stored digest is not a valid PHC string.
    #[error("stored password digest is malformed: {message}")]
    Malformed {
        /// Underlying cause.
        message: String,
    },
}

/// PHC-formatted Argon2id digest.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash `password` with a fresh random salt.
    ///
    /// # Examples
    /// ```
    /// use notebook::domain::PasswordHash;
    ///
    /// let hash = PasswordHash::derive("Tiny Hut").unwrap();
    /// assert!(hash.verify("Tiny Hut").unwrap());
    /// assert!(!hash.verify("tiny hut").unwrap());
    /// ```
    pub fn derive(password: &str) -> Result<Self, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| PasswordHashError::Hash {
                message: err.to_string(),
            })?;
        Ok(Self(digest.to_string()))
    }

    /// Wrap a digest loaded from storage, checking it parses.
    pub fn from_phc(phc: impl Into<String>) -> Result<Self, PasswordHashError> {
        let phc = phc.into();
        password_hash::PasswordHash::new(&phc).map_err(|err| PasswordHashError::Malformed {
            message: err.to_string(),
        })?;
        Ok(Self(phc))
    }

    /// Check `candidate` against the digest.
    ///
    /// Returns `Ok(false)` on mismatch; `Err` only when the digest itself is
    /// unreadable.
    pub fn verify(&self, candidate: &str) -> Result<bool, PasswordHashError> {
        let parsed =
            password_hash::PasswordHash::new(&self.0).map_err(|err| PasswordHashError::Malformed {
                message: err.to_string(),
            })?;
        Ok(Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok())
    }

    /// The PHC string, for persistence.
    #[must_use]
    pub fn as_phc(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}
