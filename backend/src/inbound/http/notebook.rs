//! Notebook handlers: list, add and delete the caller's own notes.
//!
//! ```text
//! GET    /                    -> 302 /notebook
//! GET    /notebook            -> [{"id":1,"title":"..","content":"..","createdAt":".."}]
//! POST   /addNote title=..&content=..  -> 302 /notebook
//! DELETE /notebook/{itemId}   -> 302 /notebook | 403 | 404
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Note, NoteDraft, NoteId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::redirect;

/// Note as returned by `GET /notebook`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteView {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Shopping list")]
    pub title: String,
    #[schema(example = "A small crystal bead")]
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Note> for NoteView {
    fn from(note: Note) -> Self {
        Self {
            id: note.id.get(),
            title: note.title,
            content: note.content,
            created_at: note.created_at,
        }
    }
}

/// Form body for `POST /addNote`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddNoteForm {
    pub title: String,
    pub content: String,
}

/// Send the browser to the notebook.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 302, description = "Redirect to /notebook")),
    tags = ["notebook"],
    operation_id = "root",
    security([])
)]
#[get("/")]
pub async fn root() -> HttpResponse {
    redirect("/notebook")
}

/// List the caller's notes, oldest first.
#[utoipa::path(
    get,
    path = "/notebook",
    responses(
        (status = 200, description = "Notes owned by the caller", body = [NoteView]),
        (status = 401, description = "Login required", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["notebook"],
    operation_id = "listNotes"
)]
#[get("/notebook")]
pub async fn list_notes(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<NoteView>>> {
    let owner = session.require_principal()?;
    let notes = state.notebook.list_notes(&owner).await?;
    Ok(web::Json(notes.into_iter().map(NoteView::from).collect()))
}

/// Create a note owned by the caller.
#[utoipa::path(
    post,
    path = "/addNote",
    request_body(content = AddNoteForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Note stored; redirect to /notebook"),
        (status = 400, description = "Malformed form", body = Error),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["notebook"],
    operation_id = "addNote"
)]
#[post("/addNote")]
pub async fn add_note(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<AddNoteForm>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_principal()?;
    let AddNoteForm { title, content } = form.into_inner();
    state
        .notebook_command
        .add_note(&owner, NoteDraft::new(title, content))
        .await?;
    Ok(redirect("/notebook"))
}

/// Delete one of the caller's notes.
#[utoipa::path(
    delete,
    path = "/notebook/{itemId}",
    params(("itemId" = i64, Path, description = "Note id")),
    responses(
        (status = 302, description = "Note deleted; redirect to /notebook"),
        (status = 400, description = "Non-numeric id", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Note belongs to another account", body = Error),
        (status = 404, description = "No such note", body = Error)
    ),
    tags = ["notebook"],
    operation_id = "deleteNote"
)]
#[delete("/notebook/{itemId}")]
pub async fn delete_note(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_principal()?;
    let id = NoteId::new(path.into_inner());
    state.notebook_command.delete_note(&owner, id).await?;
    Ok(redirect("/notebook"))
}
