//! Tests for HTTP error mapping.

use super::*;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then, when};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn internal_error() -> Error {
    Error::internal("connection pool exhausted")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"query": "select"}))
}

#[fixture]
fn invalid_request() -> Error {
    Error::invalid_request("hours must be between 0 and 24, got 25")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"field": "hours", "code": "hours_out_of_range"}))
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("login required"), StatusCode::UNAUTHORIZED)]
#[case(Error::not_found("week not found"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("store down"), StatusCode::SERVICE_UNAVAILABLE)]
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
        .map(|value| value.to_str().expect("ascii header").to_owned());
    let bytes = to_bytes(response.into_body()).await.expect("body");
    let payload = serde_json::from_slice(&bytes).expect("error JSON");
    (status, header, payload)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(internal_error: Error) {
    let (status, header, payload) = response_payload(internal_error).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(payload.message(), "Internal server error");
    assert_eq!(payload.trace_id(), Some(TRACE_ID));
    assert!(payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn validation_errors_keep_their_details(invalid_request: Error) {
    let (status, header, payload) = response_payload(invalid_request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(
        payload.details(),
        Some(&json!({"field": "hours", "code": "hours_out_of_range"}))
    );
}

#[rstest]
#[actix_web::test]
async fn errors_without_trace_id_omit_the_header() {
    let (_, header, payload) = response_payload(Error::not_found("entry not found")).await;
    assert!(header.is_none());
    assert_eq!(payload.trace_id(), None);
}

#[given("a service unavailable error code")]
fn a_service_unavailable_error_code() -> ErrorCode {
    ErrorCode::ServiceUnavailable
}

#[when("the adapter maps the code to an HTTP status")]
fn the_adapter_maps_the_code(code: ErrorCode) -> StatusCode {
    status_for(code)
}

#[then("the status is 503 Service Unavailable")]
fn the_status_is_503(status: StatusCode) {
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[rstest]
fn store_outages_surface_as_503() {
    let code = a_service_unavailable_error_code();
    let status = the_adapter_maps_the_code(code);
    the_status_is_503(status);
}

#[rstest]
fn actix_errors_become_redacted_internal_errors() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.details(), None);
}

#[rstest]
#[actix_web::test]
async fn malformed_json_uses_the_error_schema() {
    use actix_web::{App, test, web};

    let app = test::init_service(
        App::new().app_data(json_config()).route(
            "/",
            web::post().to(|_: web::Json<serde_json::Value>| async { actix_web::HttpResponse::Ok() }),
        ),
    )
    .await;
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Error = test::read_body_json(res).await;
    assert_eq!(body.code(), ErrorCode::InvalidRequest);
    assert!(body.message().starts_with("invalid JSON body"));
}

#[rstest]
#[actix_web::test]
async fn malformed_queries_use_the_error_schema() {
    use actix_web::{App, test, web};

    #[derive(serde::Deserialize)]
    struct Paging {
        #[expect(dead_code, reason = "only deserialised")]
        page: u32,
    }

    let app = test::init_service(
        App::new().app_data(query_config()).route(
            "/",
            web::get().to(|_: web::Query<Paging>| async { actix_web::HttpResponse::Ok() }),
        ),
    )
    .await;
    let res = test::call_service(&app, test::TestRequest::get().uri("/?page=abc").to_request()).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Error = test::read_body_json(res).await;
    assert!(body.message().starts_with("invalid query string"));
}
