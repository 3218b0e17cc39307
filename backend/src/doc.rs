//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every route under `inbound::http`, the shared error
//! envelope, and the session cookie security scheme. Swagger UI serves it at
//! `/docs` in debug builds; `cargo run --bin openapi-dump` prints it.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::auth::CredentialsForm;
use crate::inbound::http::notebook::{AddNoteForm, NoteView};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the notebook service.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Notebook API",
        description = "Session-authenticated personal notes with form-based login and registration."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login_page,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::register::register_page,
        crate::inbound::http::register::register,
        crate::inbound::http::notebook::root,
        crate::inbound::http::notebook::list_notes,
        crate::inbound::http::notebook::add_note,
        crate::inbound::http::notebook::delete_note,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(Error, ErrorCode, NoteView, CredentialsForm, AddNoteForm)),
    tags(
        (name = "session", description = "Login and logout"),
        (name = "accounts", description = "Account registration"),
        (name = "notebook", description = "The caller's own notes"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn schema_fields(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(name).unwrap_or_else(|| panic!("{name} schema")) {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected Object schema for {name}"),
        }
    }

    #[rstest]
    #[case("Error", &["code", "message", "traceId", "details"])]
    #[case("NoteView", &["id", "title", "content", "createdAt"])]
    fn schemas_use_wire_field_names(#[case] name: &str, #[case] fields: &[&str]) {
        let actual = schema_fields(name);
        for field in fields {
            assert!(actual.iter().any(|f| f == field), "{name} lacks {field}");
        }
    }

    #[rstest]
    #[case("/login")]
    #[case("/logout")]
    #[case("/register")]
    #[case("/notebook")]
    #[case("/notebook/{itemId}")]
    #[case("/addNote")]
    #[case("/health/ready")]
    fn every_route_is_documented(#[case] path: &str) {
        assert!(ApiDoc::openapi().paths.paths.contains_key(path), "{path} missing");
    }
}
