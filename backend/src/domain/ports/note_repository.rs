//! Driven port for note persistence.
use async_trait::async_trait;

use crate::domain::{AccountId, NewNote, Note, NoteId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by note repository adapters.
    pub enum NoteRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "note repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "note repository query failed: {message}",
    }
}

/// Storage for notes, keyed by owner through a single foreign key.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Notes owned by `owner`, oldest first.
    async fn list_by_owner(&self, owner: AccountId) -> Result<Vec<Note>, NoteRepositoryError>;

    /// Fetch a single note regardless of owner.
    async fn find_by_id(&self, id: NoteId) -> Result<Option<Note>, NoteRepositoryError>;

    /// Insert a note and return it with its assigned id.
    async fn insert(&self, note: &NewNote) -> Result<Note, NoteRepositoryError>;

    /// Delete `id` only if `owner` owns it. Returns whether a row was removed.
    async fn delete_owned(&self, id: NoteId, owner: AccountId) -> Result<bool, NoteRepositoryError>;
}
