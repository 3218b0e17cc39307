//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{AccountId, Credentials, Error};

/// Creates new accounts with an empty notebook.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRegistration: Send + Sync {
    /// Register `credentials` as a new account.
    ///
    /// Fails with `conflict` when the username is already taken.
    async fn register(&self, credentials: &Credentials) -> Result<AccountId, Error>;
}
