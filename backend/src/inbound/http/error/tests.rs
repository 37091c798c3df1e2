//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use actix_web::{App, test as actix_test};
use rstest::{fixture, rstest};
use serde::Deserialize;
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("later"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

async fn response_payload(error: Error) -> (StatusCode, Option<String>, Error) {
    let response = ResponseError::error_response(&error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let payload = serde_json::from_slice(&bytes).expect("error JSON deserialises");
    (status, header, payload)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(expected_trace_id: String) {
    let error = Error::internal("connection string leaked")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "secret": "x" }));

    let (status, header, payload) = response_payload(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(payload.message(), "Internal server error");
    assert!(payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn unavailable_errors_keep_details(expected_trace_id: String) {
    let error = Error::service_unavailable("User service returned 408 while validating ownerUserId.")
        .with_trace_id(expected_trace_id)
        .with_details(json!({ "upstreamStatus": 408, "reason": "timeout" }));

    let (status, _, payload) = response_payload(error).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        payload.details(),
        Some(&json!({ "upstreamStatus": 408, "reason": "timeout" }))
    );
}

#[rstest]
#[actix_web::test]
async fn errors_without_trace_id_omit_header() {
    let (_, header, payload) = response_payload(Error::not_found("missing")).await;
    assert!(header.is_none());
    assert_eq!(payload.trace_id(), None);
}

#[derive(Deserialize)]
struct Body {
    #[expect(dead_code, reason = "only deserialisation is exercised")]
    name: String,
}

#[actix_web::test]
async fn malformed_json_is_invalid_request() {
    let app = actix_test::init_service(
        App::new().app_data(json_config()).route(
            "/",
            web::post().to(|_: web::Json<Body>| async { HttpResponse::Ok().finish() }),
        ),
    )
    .await;
    let req = actix_test::TestRequest::post()
        .uri("/")
        .insert_header(("content-type", "application/json"))
        .set_payload("{ not json")
        .to_request();

    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let payload: Error = actix_test::read_body_json(res).await;
    assert_eq!(payload.code(), ErrorCode::InvalidRequest);
}

#[actix_web::test]
async fn non_integer_path_ids_are_not_found() {
    let app = actix_test::init_service(
        App::new().app_data(path_config()).route(
            "/items/{id}",
            web::get().to(|_: web::Path<i32>| async { HttpResponse::Ok().finish() }),
        ),
    )
    .await;
    let req = actix_test::TestRequest::get().uri("/items/abc").to_request();

    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let payload: Error = actix_test::read_body_json(res).await;
    assert_eq!(payload.code(), ErrorCode::NotFound);
}
