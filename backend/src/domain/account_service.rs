//! Account use-cases: credential resolution, login, and registration.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::domain::ports::{
    AccountRegistration, AccountRepository, AccountRepositoryError, CredentialResolver,
    LoginService,
};
use crate::domain::{
    AccountId, Credentials, Error, ErrorCode, NewAccount, PasswordHash, Principal, Username,
};

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Digest checked for unknown usernames so both login failures cost one
/// Argon2 verification. Uses the default Argon2id parameters.
const UNKNOWN_USER_PHC: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2hoYXNoaGFzaGhhc2g";

async fn verify_off_worker(digest: PasswordHash, candidate: &str) -> Result<bool, Error> {
    let candidate = Zeroizing::new(candidate.to_owned());
    tokio::task::spawn_blocking(move || digest.verify(&candidate))
        .await
        .map_err(|err| Error::internal(format!("password check did not complete: {err}")))?
        .map_err(|err| Error::internal(err.to_string()))
}

async fn derive_off_worker(password: &str) -> Result<PasswordHash, Error> {
    let password = Zeroizing::new(password.to_owned());
    tokio::task::spawn_blocking(move || PasswordHash::derive(&password))
        .await
        .map_err(|err| Error::internal(format!("password hashing did not complete: {err}")))?
        .map_err(|err| Error::internal(err.to_string()))
}

/// Resolve the submitted username and check the password against its digest.
///
/// Unknown usernames and wrong passwords both fail with `unauthorized`, and
/// both run one digest verification.
pub async fn authenticate_with<C>(
    resolver: &C,
    credentials: &Credentials,
) -> Result<Principal, Error>
where
    C: CredentialResolver + ?Sized,
{
    let found = match resolver.resolve(credentials.username()).await {
        Ok(principal) => Some(principal),
        Err(err) if err.code() == ErrorCode::NotFound => None,
        Err(err) => return Err(err),
    };
    let digest = match &found {
        Some(principal) => principal.password().clone(),
        None => PasswordHash::from_phc(UNKNOWN_USER_PHC)
            .map_err(|err| Error::internal(err.to_string()))?,
    };
    let matches = verify_off_worker(digest, credentials.password()).await?;

    match found {
        Some(principal) if matches => Ok(principal),
        Some(_) => {
            debug!(username = %credentials.username(), "login with wrong password");
            Err(Error::unauthorized(INVALID_CREDENTIALS))
        }
        None => {
            debug!(username = %credentials.username(), "login for unknown user");
            Err(Error::unauthorized(INVALID_CREDENTIALS))
        }
    }
}

fn map_repository_error(error: AccountRepositoryError) -> Error {
    match error {
        AccountRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("account repository unavailable: {message}"))
        }
        AccountRepositoryError::Query { message } => {
            Error::internal(format!("account repository error: {message}"))
        }
        AccountRepositoryError::DuplicateUsername { .. } => {
            Error::conflict("username already taken")
        }
    }
}

/// Account service implementing the resolver, login, and registration ports.
#[derive(Clone)]
pub struct AccountService<R> {
    accounts: Arc<R>,
}

impl<R> AccountService<R> {
    /// Create a service over an account repository.
    pub const fn new(accounts: Arc<R>) -> Self {
        Self { accounts }
    }
}

#[async_trait]
impl<R> CredentialResolver for AccountService<R>
where
    R: AccountRepository,
{
    async fn resolve(&self, username: &Username) -> Result<Principal, Error> {
        let account = self
            .accounts
            .find_by_username(username)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("no such user: {username}")))?;
        Ok(Principal::user(
            account.id(),
            account.username().clone(),
            account.password().clone(),
        ))
    }
}

#[async_trait]
impl<R> LoginService for AccountService<R>
where
    R: AccountRepository,
{
    async fn authenticate(&self, credentials: &Credentials) -> Result<Principal, Error> {
        authenticate_with(self, credentials).await
    }
}

#[async_trait]
impl<R> AccountRegistration for AccountService<R>
where
    R: AccountRepository,
{
    async fn register(&self, credentials: &Credentials) -> Result<AccountId, Error> {
        let username = credentials.username();
        let existing = self
            .accounts
            .find_by_username(username)
            .await
            .map_err(map_repository_error)?;
        if existing.is_some() {
            return Err(Error::conflict("username already taken"));
        }

        let password = derive_off_worker(credentials.password()).await?;
        let account = self
            .accounts
            .insert(&NewAccount {
                username: username.clone(),
                password,
            })
            .await
            .map_err(map_repository_error)?;
        info!(account_id = %account.id(), username = %username, "account registered");
        Ok(account.id())
    }
}
