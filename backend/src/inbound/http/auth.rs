//! Login and logout handlers.
//!
//! ```text
//! GET  /login                      -> HTML form
//! POST /login   username=..&password=..  -> 302 /notebook | 400 | 401
//! POST /logout                     -> 302 /login
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::domain::{Credentials, CredentialsValidationError, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{LOGIN_PAGE, html, redirect};

/// Username and password as submitted by the login and registration forms.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CredentialsForm {
    pub username: String,
    #[schema(format = Password)]
    pub password: String,
}

impl TryFrom<CredentialsForm> for Credentials {
    type Error = CredentialsValidationError;

    fn try_from(value: CredentialsForm) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Map shape failures to `400` with a field-level detail object.
pub(crate) fn map_credentials_error(err: CredentialsValidationError) -> Error {
    let (field, code) = match err {
        CredentialsValidationError::EmptyUsername => ("username", "empty_username"),
        CredentialsValidationError::UsernameTooLong { .. } => ("username", "username_too_long"),
        CredentialsValidationError::EmptyPassword => ("password", "empty_password"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// Render the login form.
#[utoipa::path(
    get,
    path = "/login",
    responses((status = 200, description = "Login form", content_type = "text/html", body = String)),
    tags = ["session"],
    operation_id = "loginPage",
    security([])
)]
#[get("/login")]
pub async fn login_page() -> HttpResponse {
    html(LOGIN_PAGE)
}

/// Authenticate and bind the username to a fresh session.
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = CredentialsForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Logged in; redirect to /notebook", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Account store unavailable", body = Error)
    ),
    tags = ["session"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let credentials = Credentials::try_from(form.into_inner()).map_err(map_credentials_error)?;
    let principal = state.login.authenticate(&credentials).await?;
    session.establish(principal.username())?;
    info!(username = %principal.username(), "session established");
    Ok(redirect("/notebook"))
}

/// End the session.
#[utoipa::path(
    post,
    path = "/logout",
    responses((status = 302, description = "Session cleared; redirect to /login")),
    tags = ["session"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.end();
    redirect("/login")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        MockAccountRegistration, MockLoginService, MockNotebookCommand, MockNotebookQuery,
    };
    use crate::domain::{AccountId, ErrorCode, PasswordHash, Principal};
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;
    use std::sync::Arc;

    const PHC: &str = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2hoYXNoaGFzaGhhc2g";

    fn state_with_login(login_service: MockLoginService) -> HttpState {
        HttpState::new(
            Arc::new(login_service),
            Arc::new(MockAccountRegistration::new()),
            Arc::new(MockNotebookQuery::new()),
            Arc::new(MockNotebookCommand::new()),
        )
    }

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .service(login_page)
            .service(login)
            .service(logout)
    }

    fn form_login(username: &str, password: &str) -> actix_test::TestRequest {
        actix_test::TestRequest::post()
            .uri("/login")
            .set_form([("username", username), ("password", password)])
    }

    #[actix_web::test]
    async fn login_page_renders_form() {
        let app = actix_test::init_service(test_app(state_with_login(MockLoginService::new()))).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/login").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = actix_test::read_body(res).await;
        assert!(std::str::from_utf8(&body).expect("utf8").contains("<form"));
    }

    #[actix_web::test]
    async fn successful_login_redirects_and_sets_cookie() {
        let mut service = MockLoginService::new();
        service.expect_authenticate().times(1).returning(|credentials| {
            Ok(Principal::user(
                AccountId::new(1),
                credentials.username().clone(),
                PasswordHash::from_phc(PHC).expect("fixture digest"),
            ))
        });
        let app = actix_test::init_service(test_app(state_with_login(service))).await;

        let res = actix_test::call_service(
            &app,
            form_login("Khorne", "Milk for Khorne flakes!").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(
            res.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
            Some("/notebook")
        );
        assert!(res.response().cookies().any(|c| c.name() == "session"));
    }

    #[actix_web::test]
    async fn wrong_credentials_are_unauthorised() {
        let mut service = MockLoginService::new();
        service
            .expect_authenticate()
            .returning(|_| Err(Error::unauthorized("invalid credentials")));
        let app = actix_test::init_service(test_app(state_with_login(service))).await;

        let res = actix_test::call_service(&app, form_login("Khorne", "wrong").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let value: Value = actix_test::read_body_json(res).await;
        assert_eq!(value["code"], "unauthorized");
        assert_eq!(value["message"], "invalid credentials");
    }

    #[rstest]
    #[case("   ", "pw", "username", "empty_username")]
    #[case("Khorne", "", "password", "empty_password")]
    #[actix_web::test]
    async fn malformed_credentials_are_rejected_before_lookup(
        #[case] username: &str,
        #[case] password: &str,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let mut service = MockLoginService::new();
        service.expect_authenticate().never();
        let app = actix_test::init_service(test_app(state_with_login(service))).await;

        let res =
            actix_test::call_service(&app, form_login(username, password).to_request()).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(res).await;
        assert_eq!(value["details"]["field"], field);
        assert_eq!(value["details"]["code"], code);
    }

    #[actix_web::test]
    async fn logout_redirects_to_login() {
        let app = actix_test::init_service(test_app(state_with_login(MockLoginService::new()))).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post().uri("/logout").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(
            res.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
            Some("/login")
        );
    }

    #[rstest]
    fn too_long_usernames_map_to_field_error() {
        let err = map_credentials_error(CredentialsValidationError::UsernameTooLong { max: 255 });
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.details(), Some(&json!({"field": "username", "code": "username_too_long"})));
    }
}
