//! Driving ports for reading and changing a user's notebook.
//!
//! Every call names the acting user; implementations scope all reads and
//! writes to that user's account.

use async_trait::async_trait;

use crate::domain::{Error, Note, NoteDraft, NoteId, Username};

/// Read side of the notebook.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotebookQuery: Send + Sync {
    /// Notes owned by `owner`, oldest first.
    async fn list_notes(&self, owner: &Username) -> Result<Vec<Note>, Error>;
}

/// Write side of the notebook.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotebookCommand: Send + Sync {
    /// Add a note owned by `owner`.
    async fn add_note(&self, owner: &Username, draft: NoteDraft) -> Result<Note, Error>;

    /// Delete `note` if `owner` owns it.
    ///
    /// Fails with `not_found` when the note does not exist and `forbidden`
    /// when it belongs to someone else.
    async fn delete_note(&self, owner: &Username, note: NoteId) -> Result<(), Error>;
}
