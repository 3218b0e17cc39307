//! Driven port for account persistence.
use async_trait::async_trait;

use crate::domain::{Account, NewAccount, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account repository query failed: {message}",
        /// The unique username constraint rejected an insert.
        DuplicateUsername { username: String } => "username already taken: {username}",
    }
}

/// Storage for registered accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Look up the account registered under `username`.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountRepositoryError>;

    /// Insert a new account and return it with its assigned id.
    ///
    /// Fails with [`AccountRepositoryError::DuplicateUsername`] when the
    /// username is already registered.
    async fn insert(&self, account: &NewAccount) -> Result<Account, AccountRepositoryError>;
}
