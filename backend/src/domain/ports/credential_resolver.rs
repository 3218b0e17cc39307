//! Driving port that turns a username into an authenticatable principal.

use async_trait::async_trait;

use crate::domain::{Error, Principal, Username};

/// Loads the account behind a username for the session layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialResolver: Send + Sync {
    /// Resolve `username` to its principal.
    ///
    /// Fails with `not_found` ("no such user: <name>") when nothing matches.
    async fn resolve(&self, username: &Username) -> Result<Principal, Error>;
}
