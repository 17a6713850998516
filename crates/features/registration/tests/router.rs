#![cfg(feature = "server")]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use axum::response::Response;
use summit_registration::server::{
    ACCEPTED_MESSAGE, METHOD_NOT_ALLOWED_MESSAGE, MISSING_FIELDS_MESSAGE, SERVER_ERROR_MESSAGE,
    registration_router,
};
use tower::ServiceExt;

const PATH: &str = "/.netlify/functions/register";
const LIMIT: usize = 1024;

async fn call(method: Method, body: &'static str) -> Response {
    let router: Router = registration_router(PATH, LIMIT);
    let request = Request::builder()
        .method(method)
        .uri(PATH)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("request");

    router.oneshot(request).await.expect("infallible")
}

async fn message(response: Response) -> String {
    let body = to_bytes(response.into_body(), 4096).await.expect("body");
    let json: serde_json::Value = serde_json::from_slice(&body).expect("json body");
    json["message"].as_str().expect("message field").to_owned()
}

fn assert_cors(response: &Response) {
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST, OPTIONS");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
}

#[tokio::test]
async fn preflight_returns_no_content() {
    let response = call(Method::OPTIONS, "").await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_cors(&response);
    let body = to_bytes(response.into_body(), 16).await.expect("body");
    assert!(body.is_empty());
}

#[tokio::test]
async fn get_is_not_allowed() {
    let response = call(Method::GET, "").await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_cors(&response);
    assert_eq!(message(response).await, METHOD_NOT_ALLOWED_MESSAGE);
}

#[tokio::test]
async fn complete_registration_is_accepted() {
    let response = call(
        Method::POST,
        r#"{"name":"Ada Lovelace","college":"Girton","email":"ada@example.org"}"#,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    assert_eq!(message(response).await, ACCEPTED_MESSAGE);
}

#[tokio::test]
async fn incomplete_registration_is_rejected() {
    let response = call(Method::POST, r#"{"name":"Ada Lovelace","college":""}"#).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_cors(&response);
    assert_eq!(message(response).await, MISSING_FIELDS_MESSAGE);
}

#[tokio::test]
async fn malformed_json_is_a_server_error() {
    let response = call(Method::POST, r#"{"name":"#).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors(&response);
    assert_eq!(message(response).await, SERVER_ERROR_MESSAGE);
}

#[tokio::test]
async fn other_paths_are_not_routed() {
    let router: Router = registration_router(PATH, LIMIT);
    let response = router
        .oneshot(Request::post("/register").body(Body::empty()).expect("request"))
        .await
        .expect("infallible");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn oversized_body_is_a_json_413_with_cors() {
    let padding = "x".repeat(LIMIT);
    let body = format!(r#"{{"name":"Ada","college":"Girton","note":"{padding}"}}"#);
    let router: Router = registration_router(PATH, LIMIT);
    let request = Request::post(PATH)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("request");

    let response = router.oneshot(request).await.expect("infallible");

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_cors(&response);
    assert_eq!(message(response).await, "Payload Too Large");
}

#[tokio::test]
async fn body_at_the_limit_is_still_validated() {
    let padding = "x".repeat(LIMIT - 64);
    let body = format!(r#"{{"name":"Ada","college":"Girton","note":"{padding}"}}"#);
    assert!(body.len() <= LIMIT);
    let router: Router = registration_router(PATH, LIMIT);
    let request = Request::post(PATH).body(Body::from(body)).expect("request");

    let response = router.oneshot(request).await.expect("infallible");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(message(response).await, ACCEPTED_MESSAGE);
}
