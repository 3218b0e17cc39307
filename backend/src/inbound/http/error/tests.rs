//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use actix_web::test::TestRequest;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("login required"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("note belongs to another account"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("note 7 does not exist"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("username already taken"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("db down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn response_payload(
    error: Error,
    expected_status: StatusCode,
    expected_trace_id: Option<&str>,
) -> Error {
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), expected_status);

    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("trace id header is ascii").to_owned());
    assert_eq!(header.as_deref(), expected_trace_id);

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds")
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(expected_trace_id: String) {
    let error = Error::internal("connection string leaked")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"secret": "x"}));

    let payload = response_payload(
        error,
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(expected_trace_id.as_str()),
    )
    .await;
    assert_eq!(payload.code(), ErrorCode::InternalError);
    assert_eq!(payload.message(), "Internal server error");
    assert!(payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details(expected_trace_id: String) {
    let error = Error::conflict("username already taken")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"field": "username"}));

    let payload =
        response_payload(error, StatusCode::CONFLICT, Some(expected_trace_id.as_str())).await;
    assert_eq!(payload.code(), ErrorCode::Conflict);
    assert_eq!(payload.message(), "username already taken");
    assert_eq!(payload.details(), Some(&json!({"field": "username"})));
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let payload = response_payload(Error::not_found("gone"), StatusCode::NOT_FOUND, None).await;
    assert_eq!(payload.trace_id(), None);
}

#[rstest]
fn form_errors_become_bad_requests() {
    let req = TestRequest::post().uri("/addNote").to_http_request();
    let err = form_error_handler(UrlencodedError::ContentType, &req);
    assert_eq!(err.as_response_error().status_code(), StatusCode::BAD_REQUEST);
}

#[rstest]
fn path_errors_become_bad_requests() {
    let req = TestRequest::delete().uri("/notebook/abc").to_http_request();
    let source = <serde::de::value::Error as serde::de::Error>::custom("invalid digit");
    let err = path_error_handler(PathError::Deserialize(source), &req);
    assert_eq!(err.as_response_error().status_code(), StatusCode::BAD_REQUEST);
}
