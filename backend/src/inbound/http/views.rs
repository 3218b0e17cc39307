//! Static HTML pages and redirect helpers for the browser-facing routes.
//!
//! The pages carry no user data, so they are plain constants rather than
//! templates.

use actix_web::HttpResponse;
use actix_web::http::header;

pub(crate) const LOGIN_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Notebook: log in</title></head>
<body>
<h1>Log in</h1>
<form method="post" action="/login">
  <label>Username <input name="username" autocomplete="username" required></label>
  <label>Password <input name="password" type="password" autocomplete="current-password" required></label>
  <button type="submit">Log in</button>
</form>
<p><a href="/register">Create an account</a></p>
</body>
</html>
"#;

pub(crate) const REGISTER_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Notebook: register</title></head>
<body>
<h1>Register</h1>
<form method="post" action="/register">
  <label>Username <input name="username" autocomplete="username" required></label>
  <label>Password <input name="password" type="password" autocomplete="new-password" required></label>
  <button type="submit">Register</button>
</form>
<p><a href="/login">Already registered? Log in</a></p>
</body>
</html>
"#;

/// `200 OK` with an HTML body.
pub(crate) fn html(page: &'static str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page)
}

/// `302 Found` pointing at `location`.
pub(crate) fn redirect(location: &'static str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}
