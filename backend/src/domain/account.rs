//! Registered accounts and their identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::PasswordHash;

/// Upper bound on username length, matching the `accounts.username` column.
pub const USERNAME_MAX: usize = 255;

/// Surrogate key of an account row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(i64);

impl AccountId {
    /// Wrap a raw database identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Errors raised when a username fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsernameValidationError {
    /// Blank once trimmed.
    #[error("username must not be empty")]
    Empty,
    /// Longer than [`USERNAME_MAX`] characters.
    #[error("username must be at most {max} characters")]
    TooLong {
        /// Configured limit.
        max: usize,
    },
}

/// Login identifier, unique across accounts.
///
/// ## Invariants
/// - Trimmed, non-empty, at most [`USERNAME_MAX`] characters.
///
/// # Examples
/// ```
/// use notebook::domain::Username;
///
/// let name = Username::new("  Khorne ").unwrap();
/// assert_eq!(name.as_ref(), "Khorne");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Validate and normalise a raw username.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UsernameValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UsernameValidationError::Empty);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UsernameValidationError::TooLong { max: USERNAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A persisted account. Its notes are looked up by owner, never embedded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    username: Username,
    password: PasswordHash,
}

impl Account {
    /// Assemble an account from persisted parts.
    #[must_use]
    pub const fn new(id: AccountId, username: Username, password: PasswordHash) -> Self {
        Self {
            id,
            username,
            password,
        }
    }

    /// Surrogate key.
    #[must_use]
    pub const fn id(&self) -> AccountId {
        self.id
    }

    /// Login identifier.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Stored password digest.
    #[must_use]
    pub const fn password(&self) -> &PasswordHash {
        &self.password
    }
}

/// Values needed to insert an account; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    /// Login identifier.
    pub username: Username,
    /// Password digest.
    pub password: PasswordHash,
}
