//! Notebook use-cases scoped to the acting user's account.
//!
//! Each operation first loads the account behind the session username, then
//! touches only notes whose owner is that account.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, NoteRepository, NoteRepositoryError,
    NotebookCommand, NotebookQuery,
};
use crate::domain::{Account, Error, NewNote, Note, NoteDraft, NoteId, Username};

fn map_account_error(error: AccountRepositoryError) -> Error {
    match error {
        AccountRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("account repository unavailable: {message}"))
        }
        AccountRepositoryError::Query { message } => {
            Error::internal(format!("account repository error: {message}"))
        }
        AccountRepositoryError::DuplicateUsername { username } => {
            Error::internal(format!("unexpected duplicate username: {username}"))
        }
    }
}

fn map_note_error(error: NoteRepositoryError) -> Error {
    match error {
        NoteRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("note repository unavailable: {message}"))
        }
        NoteRepositoryError::Query { message } => {
            Error::internal(format!("note repository error: {message}"))
        }
    }
}

/// Notebook service implementing the query and command driving ports.
#[derive(Clone)]
pub struct NotebookService<A, N> {
    accounts: Arc<A>,
    notes: Arc<N>,
    clock: Arc<dyn Clock>,
}

impl<A, N> NotebookService<A, N> {
    /// Create a service over the account and note repositories.
    pub fn new(accounts: Arc<A>, notes: Arc<N>, clock: Arc<dyn Clock>) -> Self {
        Self {
            accounts,
            notes,
            clock,
        }
    }
}

impl<A, N> NotebookService<A, N>
where
    A: AccountRepository,
{
    /// Load the account behind a session username.
    ///
    /// A session naming a vanished account is treated as no session at all.
    async fn owner_account(&self, owner: &Username) -> Result<Account, Error> {
        self.accounts
            .find_by_username(owner)
            .await
            .map_err(map_account_error)?
            .ok_or_else(|| {
                warn!(username = %owner, "session refers to unknown account");
                Error::unauthorized("login required")
            })
    }
}

#[async_trait]
impl<A, N> NotebookQuery for NotebookService<A, N>
where
    A: AccountRepository,
    N: NoteRepository,
{
    async fn list_notes(&self, owner: &Username) -> Result<Vec<Note>, Error> {
        let account = self.owner_account(owner).await?;
        self.notes
            .list_by_owner(account.id())
            .await
            .map_err(map_note_error)
    }
}

#[async_trait]
impl<A, N> NotebookCommand for NotebookService<A, N>
where
    A: AccountRepository,
    N: NoteRepository,
{
    async fn add_note(&self, owner: &Username, draft: NoteDraft) -> Result<Note, Error> {
        let account = self.owner_account(owner).await?;
        let note = self
            .notes
            .insert(&NewNote {
                owner: account.id(),
                title: draft.title,
                content: draft.content,
                created_at: self.clock.utc(),
            })
            .await
            .map_err(map_note_error)?;
        info!(note_id = %note.id, account_id = %account.id(), "note added");
        Ok(note)
    }

    async fn delete_note(&self, owner: &Username, note: NoteId) -> Result<(), Error> {
        let account = self.owner_account(owner).await?;
        let existing = self
            .notes
            .find_by_id(note)
            .await
            .map_err(map_note_error)?
            .ok_or_else(|| Error::not_found(format!("note {note} does not exist")))?;

        if !existing.is_owned_by(account.id()) {
            warn!(
                note_id = %note,
                account_id = %account.id(),
                owner_id = %existing.owner,
                "refused cross-account note deletion"
            );
            return Err(Error::forbidden("note belongs to another account"));
        }

        let removed = self
            .notes
            .delete_owned(note, account.id())
            .await
            .map_err(map_note_error)?;
        if !removed {
            return Err(Error::not_found(format!("note {note} does not exist")));
        }
        info!(note_id = %note, account_id = %account.id(), "note deleted");
        Ok(())
    }
}
