//! Account registration handlers.
//!
//! ```text
//! GET  /register                          -> HTML form
//! POST /register username=..&password=..  -> 302 /login | 400 | 409
//! ```

use actix_web::{HttpResponse, get, post, web};
use tracing::info;

use crate::domain::{Credentials, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{CredentialsForm, map_credentials_error};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{REGISTER_PAGE, html, redirect};

/// Render the registration form.
#[utoipa::path(
    get,
    path = "/register",
    responses((status = 200, description = "Registration form", content_type = "text/html", body = String)),
    tags = ["accounts"],
    operation_id = "registerPage",
    security([])
)]
#[get("/register")]
pub async fn register_page() -> HttpResponse {
    html(REGISTER_PAGE)
}

/// Create an account with no notes.
#[utoipa::path(
    post,
    path = "/register",
    request_body(content = CredentialsForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Account created; redirect to /login"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Username already taken", body = Error),
        (status = 503, description = "Account store unavailable", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    form: web::Form<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let credentials = Credentials::try_from(form.into_inner()).map_err(map_credentials_error)?;
    let id = state.registration.register(&credentials).await?;
    info!(account_id = %id, "registered account");
    Ok(redirect("/login"))
}
