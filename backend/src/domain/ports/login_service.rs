//! Driving port for login.
//!
//! Inbound adapters call it to check submitted credentials without knowing how
//! accounts are stored, which keeps handler tests free of persistence.

use async_trait::async_trait;

use crate::domain::{Credentials, Error, Principal};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify credentials and return the authenticated principal.
    ///
    /// Unknown usernames and wrong passwords both fail with `unauthorized`.
    async fn authenticate(&self, credentials: &Credentials) -> Result<Principal, Error>;
}
