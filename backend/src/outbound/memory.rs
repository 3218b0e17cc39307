//! In-process account and note storage.
//!
//! Used when the server starts without a database URL. State lives for the
//! lifetime of the process and is shared by every clone of [`MemoryStore`].
//! Both ports are implemented on the same value so the single-owner link
//! between notes and accounts is kept in one place.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, NoteRepository, NoteRepositoryError,
};
use crate::domain::{Account, AccountId, NewAccount, NewNote, Note, NoteId, Username};

#[derive(Debug, Default)]
struct Tables {
    accounts: Vec<Account>,
    notes: Vec<Note>,
    next_account_id: i64,
    next_note_id: i64,
}

impl Tables {
    fn allocate_account_id(&mut self) -> AccountId {
        self.next_account_id += 1;
        AccountId::new(self.next_account_id)
    }

    fn allocate_note_id(&mut self) -> NoteId {
        self.next_note_id += 1;
        NoteId::new(self.next_note_id)
    }
}

/// Shared in-memory implementation of the repository ports.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for MemoryStore {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .accounts
            .iter()
            .find(|account| account.username() == username)
            .cloned())
    }

    async fn insert(&self, account: &NewAccount) -> Result<Account, AccountRepositoryError> {
        let mut tables = self.tables.lock().await;
        if tables
            .accounts
            .iter()
            .any(|existing| existing.username() == &account.username)
        {
            return Err(AccountRepositoryError::duplicate_username(
                account.username.as_ref(),
            ));
        }
        let id = tables.allocate_account_id();
        let stored = Account::new(id, account.username.clone(), account.password.clone());
        tables.accounts.push(stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl NoteRepository for MemoryStore {
    async fn list_by_owner(&self, owner: AccountId) -> Result<Vec<Note>, NoteRepositoryError> {
        let tables = self.tables.lock().await;
        let mut notes: Vec<Note> = tables
            .notes
            .iter()
            .filter(|note| note.is_owned_by(owner))
            .cloned()
            .collect();
        notes.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(notes)
    }

    async fn find_by_id(&self, id: NoteId) -> Result<Option<Note>, NoteRepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables.notes.iter().find(|note| note.id == id).cloned())
    }

    async fn insert(&self, note: &NewNote) -> Result<Note, NoteRepositoryError> {
        let mut tables = self.tables.lock().await;
        if !tables.accounts.iter().any(|account| account.id() == note.owner) {
            return Err(NoteRepositoryError::query(format!(
                "owner {} does not exist",
                note.owner
            )));
        }
        let id = tables.allocate_note_id();
        let stored = Note {
            id,
            owner: note.owner,
            title: note.title.clone(),
            content: note.content.clone(),
            created_at: note.created_at,
        };
        tables.notes.push(stored.clone());
        Ok(stored)
    }

    async fn delete_owned(&self, id: NoteId, owner: AccountId) -> Result<bool, NoteRepositoryError> {
        let mut tables = self.tables.lock().await;
        let before = tables.notes.len();
        tables
            .notes
            .retain(|note| !(note.id == id && note.is_owned_by(owner)));
        Ok(tables.notes.len() < before)
    }
}
