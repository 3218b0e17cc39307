//! PostgreSQL-backed `AccountRepository` using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{Account, AccountId, NewAccount, PasswordHash, Username};

use super::diesel_basic_error_mapping::{DieselFailure, classify_diesel_error, map_pool_error};
use super::models::{AccountRow, NewAccountRow};
use super::pool::DbPool;
use super::schema::accounts;

/// Diesel implementation of the `AccountRepository` port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a repository over `pool`.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_diesel_error(error: &diesel::result::Error, username: &str) -> AccountRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection => AccountRepositoryError::connection(DieselFailure::Connection.summary()),
        DieselFailure::UniqueViolation => AccountRepositoryError::duplicate_username(username),
        DieselFailure::Query => AccountRepositoryError::query(DieselFailure::Query.summary()),
    }
}

fn row_to_account(row: AccountRow) -> Result<Account, AccountRepositoryError> {
    let username = Username::new(&row.username).map_err(|err| {
        warn!(account_id = row.id, error = %err, "stored username fails validation");
        AccountRepositoryError::query(format!("invalid stored username: {err}"))
    })?;
    let password = PasswordHash::from_phc(row.password).map_err(|err| {
        warn!(account_id = row.id, "stored password digest is malformed");
        AccountRepositoryError::query(err.to_string())
    })?;
    Ok(Account::new(AccountId::new(row.id), username, password))
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, AccountRepositoryError::connection))?;

        let row: Option<AccountRow> = accounts::table
            .filter(accounts::username.eq(username.as_ref()))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(&err, username.as_ref()))?;

        row.map(row_to_account).transpose()
    }

    async fn insert(&self, account: &NewAccount) -> Result<Account, AccountRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, AccountRepositoryError::connection))?;

        let row: AccountRow = diesel::insert_into(accounts::table)
            .values(&NewAccountRow {
                username: account.username.as_ref(),
                password: account.password.as_phc(),
            })
            .returning(AccountRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, account.username.as_ref()))?;

        row_to_account(row)
    }
}
