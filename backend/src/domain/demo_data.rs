//! Demo accounts created at startup.
//!
//! Seeding is keyed by username: an account that already exists is not
//! recreated, so restarting the service never duplicates demo data. An
//! existing demo account that owns no notes gets its starting note back,
//! which lets a pass interrupted between the two inserts finish on restart.

use std::sync::Arc;

use mockable::Clock;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, NoteRepository, NoteRepositoryError,
};
use crate::domain::{
    AccountId, NewAccount, NewNote, PasswordHash, PasswordHashError, Username, UsernameValidationError,
};

/// One demo account and the note it starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoAccount {
    /// Login identifier.
    pub username: &'static str,
    /// Plaintext password, hashed before storage.
    pub password: &'static str,
    /// Title of the initial note.
    pub note_title: &'static str,
    /// Body of the initial note.
    pub note_content: &'static str,
}

/// Built-in demo accounts.
pub const DEMO_ACCOUNTS: [DemoAccount; 2] = [
    DemoAccount {
        username: "Khorne",
        password: "Milk for Khorne flakes!",
        note_title: "Shopping list",
        note_content: "Blood for me, skulls for the throne, milk for the flakes",
    },
    DemoAccount {
        username: "Leomund",
        password: "Tiny Hut",
        note_title: "Shopping list",
        note_content: "A small crystal bead",
    },
];

/// Errors raised while seeding demo data.
#[derive(Debug, Error)]
pub enum DemoDataError {
    /// A built-in username failed validation.
    #[error("invalid demo username: {0}")]
    Username(#[from] UsernameValidationError),
    /// Hashing a demo password failed.
    #[error("demo password hashing failed: {0}")]
    Password(#[from] PasswordHashError),
    /// Account persistence failed.
    #[error("demo account persistence failed: {0}")]
    Accounts(#[from] AccountRepositoryError),
    /// Note persistence failed.
    #[error("demo note persistence failed: {0}")]
    Notes(#[from] NoteRepositoryError),
}

/// Usernames created and skipped by one seeding pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemoDataOutcome {
    /// Accounts inserted by this pass.
    pub created: Vec<String>,
    /// Accounts that already existed.
    pub existing: Vec<String>,
    /// Existing accounts whose missing starting note was restored.
    pub repaired: Vec<String>,
}

/// Ensures the demo accounts exist.
pub struct DemoDataSeeder<A, N> {
    accounts: Arc<A>,
    notes: Arc<N>,
    clock: Arc<dyn Clock>,
}

impl<A, N> DemoDataSeeder<A, N>
where
    A: AccountRepository,
    N: NoteRepository,
{
    /// Create a seeder over the account and note repositories.
    pub fn new(accounts: Arc<A>, notes: Arc<N>, clock: Arc<dyn Clock>) -> Self {
        Self {
            accounts,
            notes,
            clock,
        }
    }

    /// Insert every [`DEMO_ACCOUNTS`] entry whose username is not taken.
    pub async fn ensure(&self) -> Result<DemoDataOutcome, DemoDataError> {
        self.ensure_accounts(&DEMO_ACCOUNTS).await
    }

    /// Insert each of `demo` whose username is not taken.
    pub async fn ensure_accounts(
        &self,
        demo: &[DemoAccount],
    ) -> Result<DemoDataOutcome, DemoDataError> {
        let mut outcome = DemoDataOutcome::default();
        for entry in demo {
            let username = Username::new(entry.username)?;
            if let Some(account) = self.accounts.find_by_username(&username).await? {
                debug!(username = %username, "demo account already present");
                if self.notes.list_by_owner(account.id()).await?.is_empty() {
                    self.insert_note(account.id(), entry).await?;
                    info!(username = %username, "demo note restored");
                    outcome.repaired.push(entry.username.to_owned());
                }
                outcome.existing.push(entry.username.to_owned());
                continue;
            }

            let password = PasswordHash::derive(entry.password)?;
            let account = match self
                .accounts
                .insert(&NewAccount {
                    username: username.clone(),
                    password,
                })
                .await
            {
                Ok(account) => account,
                // Another instance seeded it between our lookup and insert.
                Err(AccountRepositoryError::DuplicateUsername { .. }) => {
                    outcome.existing.push(entry.username.to_owned());
                    continue;
                }
                Err(err) => return Err(err.into()),
            };

            self.insert_note(account.id(), entry).await?;
            info!(username = %username, account_id = %account.id(), "demo account created");
            outcome.created.push(entry.username.to_owned());
        }
        Ok(outcome)
    }

    async fn insert_note(&self, owner: AccountId, entry: &DemoAccount) -> Result<(), DemoDataError> {
        self.notes
            .insert(&NewNote {
                owner,
                title: entry.note_title.to_owned(),
                content: entry.note_content.to_owned(),
                created_at: self.clock.utc(),
            })
            .await?;
        Ok(())
    }
}
