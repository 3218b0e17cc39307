//! End-to-end HTTP tests over the fully wired application.
//!
//! Each test builds the real `App` over the in-memory store with the demo
//! accounts seeded, then drives it through `actix_web::test`.

use std::sync::Arc;

use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::ServiceResponse;
use actix_web::http::{StatusCode, header};
use actix_web::{test as actix_test, web};
use mockable::{Clock, DefaultClock};
use notebook::TraceId;
use notebook::inbound::http::health::HealthState;
use notebook::server::{AppDependencies, Storage, build_app};
use serde_json::Value;

async fn seeded_deps() -> AppDependencies {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let storage = Storage::memory();
    storage
        .ensure_demo_data(clock.clone())
        .await
        .expect("demo data seeds");
    let health_state = web::Data::new(HealthState::new());
    health_state.mark_ready();
    AppDependencies {
        health_state,
        http_state: web::Data::new(storage.http_state(clock)),
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    }
}

fn credentials_form(uri: &str, username: &str, password: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri(uri)
        .set_form([("username", username), ("password", password)])
}

fn session_cookie(res: &ServiceResponse) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

fn location(res: &ServiceResponse) -> Option<&str> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

fn notebook_request(cookie: &Cookie<'static>) -> actix_test::TestRequest {
    actix_test::TestRequest::get()
        .uri("/notebook")
        .cookie(cookie.clone())
}

fn titles(notes: &Value) -> Vec<&str> {
    notes
        .as_array()
        .expect("array of notes")
        .iter()
        .filter_map(|note| note["title"].as_str())
        .collect()
}

#[actix_web::test]
async fn registered_user_logs_in_to_an_empty_notebook() {
    let app = actix_test::init_service(build_app(seeded_deps().await)).await;

    let res = actix_test::call_service(
        &app,
        credentials_form("/register", "Nurgle", "Grandfather").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), Some("/login"));

    let res = actix_test::call_service(
        &app,
        credentials_form("/login", "Nurgle", "Grandfather").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), Some("/notebook"));
    let cookie = session_cookie(&res);

    let notes: Value =
        actix_test::call_and_read_body_json(&app, notebook_request(&cookie).to_request()).await;
    assert_eq!(notes, Value::Array(Vec::new()));
}

#[actix_web::test]
async fn seeded_accounts_see_their_shopping_list() {
    let app = actix_test::init_service(build_app(seeded_deps().await)).await;
    let res = actix_test::call_service(
        &app,
        credentials_form("/login", "Khorne", "Milk for Khorne flakes!").to_request(),
    )
    .await;
    let cookie = session_cookie(&res);

    let notes: Value =
        actix_test::call_and_read_body_json(&app, notebook_request(&cookie).to_request()).await;
    assert_eq!(titles(&notes), ["Shopping list"]);
    assert_eq!(
        notes[0]["content"],
        "Blood for me, skulls for the throne, milk for the flakes"
    );
}

#[actix_web::test]
async fn notes_stay_with_their_owner() {
    let app = actix_test::init_service(build_app(seeded_deps().await)).await;
    let khorne = session_cookie(
        &actix_test::call_service(
            &app,
            credentials_form("/login", "Khorne", "Milk for Khorne flakes!").to_request(),
        )
        .await,
    );
    let leomund = session_cookie(
        &actix_test::call_service(
            &app,
            credentials_form("/login", "Leomund", "Tiny Hut").to_request(),
        )
        .await,
    );

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/addNote")
            .cookie(khorne.clone())
            .set_form([("title", "Skulls"), ("content", "<b>many</b>")])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);

    let mine: Value =
        actix_test::call_and_read_body_json(&app, notebook_request(&khorne).to_request()).await;
    assert_eq!(titles(&mine), ["Shopping list", "Skulls"]);
    assert_eq!(mine[1]["content"], "<b>many</b>");

    let theirs: Value =
        actix_test::call_and_read_body_json(&app, notebook_request(&leomund).to_request()).await;
    assert_eq!(titles(&theirs), ["Shopping list"]);
    assert_eq!(theirs[0]["content"], "A small crystal bead");
}

#[actix_web::test]
async fn only_the_owner_can_delete_a_note() {
    let app = actix_test::init_service(build_app(seeded_deps().await)).await;
    let khorne = session_cookie(
        &actix_test::call_service(
            &app,
            credentials_form("/login", "Khorne", "Milk for Khorne flakes!").to_request(),
        )
        .await,
    );
    let leomund = session_cookie(
        &actix_test::call_service(
            &app,
            credentials_form("/login", "Leomund", "Tiny Hut").to_request(),
        )
        .await,
    );
    let notes: Value =
        actix_test::call_and_read_body_json(&app, notebook_request(&khorne).to_request()).await;
    let id = notes[0]["id"].as_i64().expect("numeric id");

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/notebook/{id}"))
            .cookie(leomund)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let notes: Value =
        actix_test::call_and_read_body_json(&app, notebook_request(&khorne).to_request()).await;
    assert_eq!(titles(&notes), ["Shopping list"]);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/notebook/{id}"))
            .cookie(khorne.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    let notes: Value =
        actix_test::call_and_read_body_json(&app, notebook_request(&khorne).to_request()).await;
    assert!(titles(&notes).is_empty());

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/notebook/{id}"))
            .cookie(khorne)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn wrong_credentials_are_unauthorised() {
    let app = actix_test::init_service(build_app(seeded_deps().await)).await;
    for (username, password) in [("Slaanesh", "excess"), ("Khorne", "milk")] {
        let res = actix_test::call_service(
            &app,
            credentials_form("/login", username, password).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.response().cookies().all(|c| c.name() != "session"));
    }
}

#[actix_web::test]
async fn taken_usernames_conflict() {
    let app = actix_test::init_service(build_app(seeded_deps().await)).await;
    let res = actix_test::call_service(
        &app,
        credentials_form("/register", "Khorne", "another").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "conflict");

    let res = actix_test::call_service(
        &app,
        credentials_form("/login", "Khorne", "Milk for Khorne flakes!").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
}

#[actix_web::test]
async fn logout_ends_the_session() {
    let app = actix_test::init_service(build_app(seeded_deps().await)).await;
    let cookie = session_cookie(
        &actix_test::call_service(
            &app,
            credentials_form("/login", "Leomund", "Tiny Hut").to_request(),
        )
        .await,
    );

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), Some("/login"));
    let cleared = session_cookie(&res);

    let res = actix_test::call_service(&app, notebook_request(&cleared).to_request()).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn anonymous_errors_echo_the_trace_id() {
    let app = actix_test::init_service(build_app(seeded_deps().await)).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/notebook").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let header_id = res
        .headers()
        .get("trace-id")
        .and_then(|value| value.to_str().ok())
        .expect("trace-id header")
        .to_owned();
    header_id
        .parse::<TraceId>()
        .expect("header carries a trace id");

    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["traceId"], header_id.as_str());
}

#[actix_web::test]
async fn pages_and_probes_are_public() {
    let app = actix_test::init_service(build_app(seeded_deps().await)).await;
    for uri in ["/login", "/register", "/health/ready", "/health/live"] {
        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;
        assert_eq!(res.status(), StatusCode::OK, "{uri}");
    }
}
