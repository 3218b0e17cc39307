//! Authentication primitives: submitted credentials and resolved principals.
//!
//! Inbound adapters turn raw form values into [`Credentials`] before calling a
//! port, so services only ever see trimmed, non-empty input.

use std::fmt;

use zeroize::Zeroizing;

use super::{AccountId, PasswordHash, Username, UsernameValidationError};

/// Validation failures for submitted credentials.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    /// Username was blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Username exceeded the column limit.
    #[error("username must be at most {max} characters")]
    UsernameTooLong {
        /// Configured limit.
        max: usize,
    },
    /// Password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

impl From<UsernameValidationError> for CredentialsValidationError {
    fn from(value: UsernameValidationError) -> Self {
        match value {
            UsernameValidationError::Empty => Self::EmptyUsername,
            UsernameValidationError::TooLong { max } => Self::UsernameTooLong { max },
        }
    }
}

/// Username/password pair submitted to login or registration.
///
/// ## Invariants
/// - `username` satisfies [`Username`] validation.
/// - `password` is non-empty and kept verbatim, whitespace included.
///
/// # Examples
/// ```
/// use notebook::domain::Credentials;
///
/// let creds = Credentials::try_from_parts(" Leomund ", "Tiny Hut").unwrap();
/// assert_eq!(creds.username().as_ref(), "Leomund");
/// assert_eq!(creds.password(), "Tiny Hut");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: Username,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Validate raw form values.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let username = Username::new(username)?;
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Plaintext password as submitted.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Role granted to a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Authority {
    /// Every registered account holds this role and nothing else.
    User,
}

impl Authority {
    /// Wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
        }
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticatable view of an account produced by the credential resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    account: AccountId,
    username: Username,
    password: PasswordHash,
    authorities: Vec<Authority>,
}

impl Principal {
    /// Build a principal holding the single [`Authority::User`] role.
    #[must_use]
    pub fn user(account: AccountId, username: Username, password: PasswordHash) -> Self {
        Self {
            account,
            username,
            password,
            authorities: vec![Authority::User],
        }
    }

    /// Backing account.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        self.account
    }

    /// Stored username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Stored password digest.
    #[must_use]
    pub const fn password(&self) -> &PasswordHash {
        &self.password
    }

    /// Granted roles.
    #[must_use]
    pub fn authorities(&self) -> &[Authority] {
        &self.authorities
    }
}
