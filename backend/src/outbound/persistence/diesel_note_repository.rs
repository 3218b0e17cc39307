//! PostgreSQL-backed `NoteRepository` using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{NoteRepository, NoteRepositoryError};
use crate::domain::{AccountId, NewNote, Note, NoteId};

use super::diesel_basic_error_mapping::{DieselFailure, classify_diesel_error, map_pool_error};
use super::models::{NewNoteRow, NoteRow};
use super::pool::DbPool;
use super::schema::notes;

/// Diesel implementation of the `NoteRepository` port.
#[derive(Clone)]
pub struct DieselNoteRepository {
    pool: DbPool,
}

impl DieselNoteRepository {
    /// Create a repository over `pool`.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_diesel_error(error: &diesel::result::Error) -> NoteRepositoryError {
    match classify_diesel_error(error) {
        failure @ DieselFailure::Connection => NoteRepositoryError::connection(failure.summary()),
        failure @ (DieselFailure::UniqueViolation | DieselFailure::Query) => {
            NoteRepositoryError::query(failure.summary())
        }
    }
}

fn row_to_note(row: NoteRow) -> Note {
    Note {
        id: NoteId::new(row.id),
        owner: AccountId::new(row.account_id),
        title: row.title,
        content: row.content,
        created_at: row.created_at,
    }
}

#[async_trait]
impl NoteRepository for DieselNoteRepository {
    async fn list_by_owner(&self, owner: AccountId) -> Result<Vec<Note>, NoteRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, NoteRepositoryError::connection))?;

        let rows: Vec<NoteRow> = notes::table
            .filter(notes::account_id.eq(owner.get()))
            .order((notes::created_at.asc(), notes::id.asc()))
            .select(NoteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err))?;

        Ok(rows.into_iter().map(row_to_note).collect())
    }

    async fn find_by_id(&self, id: NoteId) -> Result<Option<Note>, NoteRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, NoteRepositoryError::connection))?;

        let row: Option<NoteRow> = notes::table
            .find(id.get())
            .select(NoteRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(&err))?;

        Ok(row.map(row_to_note))
    }

    async fn insert(&self, note: &NewNote) -> Result<Note, NoteRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, NoteRepositoryError::connection))?;

        let row: NoteRow = diesel::insert_into(notes::table)
            .values(&NewNoteRow {
                account_id: note.owner.get(),
                title: &note.title,
                content: &note.content,
                created_at: note.created_at,
            })
            .returning(NoteRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err))?;

        Ok(row_to_note(row))
    }

    async fn delete_owned(&self, id: NoteId, owner: AccountId) -> Result<bool, NoteRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, NoteRepositoryError::connection))?;

        let removed = diesel::delete(
            notes::table
                .filter(notes::id.eq(id.get()))
                .filter(notes::account_id.eq(owner.get())),
        )
        .execute(&mut conn)
        .await
        .map_err(|err| map_diesel_error(&err))?;

        Ok(removed > 0)
    }
}
