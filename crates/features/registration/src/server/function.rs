//! The registration function: one HTTP-like request in, one HTTP-like response out.
//!
//! Nothing is stored. Accepted and rejected submissions only reach the operational log.

use crate::error::{RegistrationError, RegistrationErrorExt};
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value, json};
use summit_kernel::domain::constants::REQUIRED_FIELDS;
use tracing::{debug, error, info, warn};

pub const ACCEPTED_MESSAGE: &str = "Registration received — thank you!";
pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method Not Allowed";
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Incoming request as the function sees it.
#[derive(Debug, Clone)]
pub struct FunctionRequest {
    pub method: Method,
    pub body: Bytes,
}

impl FunctionRequest {
    pub fn new(method: Method, body: impl Into<Bytes>) -> Self {
        Self { method, body: body.into() }
    }

    pub fn post(body: impl Into<Bytes>) -> Self {
        Self::new(Method::POST, body)
    }
}

/// Outgoing response: status, JSON + CORS headers and an optional JSON body.
#[derive(Debug, Clone)]
pub struct FunctionResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl FunctionResponse {
    fn empty(status: StatusCode) -> Self {
        Self { status, headers: response_headers(), body: None }
    }

    fn message(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            headers: response_headers(),
            body: Some(json!({ "message": message }).to_string()),
        }
    }

    /// The body could not be read (too large, or the connection failed mid-stream).
    #[must_use]
    pub fn body_rejected(rejection: &BytesRejection) -> Self {
        let status = rejection.status();
        warn!(%status, reason = %rejection.body_text(), "Registration body rejected");
        Self::message(status, status.canonical_reason().unwrap_or(SERVER_ERROR_MESSAGE))
    }

    /// The `message` field of the body, if any.
    #[must_use]
    pub fn message_text(&self) -> Option<String> {
        let body: Value = serde_json::from_str(self.body.as_deref()?).ok()?;
        body.get("message").and_then(Value::as_str).map(str::to_owned)
    }
}

impl IntoResponse for FunctionResponse {
    fn into_response(self) -> Response {
        (self.status, self.headers, self.body.unwrap_or_default()).into_response()
    }
}

fn response_headers() -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(4);
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static("POST, OPTIONS"));
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("Content-Type"));
    headers
}

/// Validates a registration request.
///
/// | Request | Response |
/// |---------|----------|
/// | `OPTIONS` | `204`, empty body |
/// | any method other than `POST` | `405 {"message":"Method Not Allowed"}` |
/// | `POST` with a body that is not JSON | `500 {"message":"Server error"}` |
/// | `POST` without a non-empty `name` or `college` | `400 {"message":"Missing required fields"}` |
/// | `POST` otherwise | `200 {"message":"Registration received — thank you!"}` |
///
/// An empty body counts as `{}`. Extra fields are accepted and never inspected.
#[must_use]
pub fn handle(request: &FunctionRequest) -> FunctionResponse {
    if request.method == Method::OPTIONS {
        return FunctionResponse::empty(StatusCode::NO_CONTENT);
    }

    if request.method != Method::POST {
        debug!(method = %request.method, "Registration method not allowed");
        return FunctionResponse::message(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_MESSAGE);
    }

    let payload = match parse_payload(&request.body) {
        Ok(payload) => payload,
        Err(e) => {
            error!(error = %e, "Register function error");
            return FunctionResponse::message(
                StatusCode::INTERNAL_SERVER_ERROR,
                SERVER_ERROR_MESSAGE,
            );
        }
    };

    let missing = missing_required(&payload);
    let payload = Value::Object(payload);
    if !missing.is_empty() {
        warn!(?missing, %payload, "Registration rejected");
        return FunctionResponse::message(StatusCode::BAD_REQUEST, MISSING_FIELDS_MESSAGE);
    }

    info!(%payload, "New registration");
    FunctionResponse::message(StatusCode::OK, ACCEPTED_MESSAGE)
}

/// JSON objects pass through; any other JSON value is treated as an object with no fields.
fn parse_payload(body: &[u8]) -> Result<Map<String, Value>, RegistrationError> {
    if body.is_empty() {
        return Ok(Map::new());
    }

    let value: Value =
        serde_json::from_slice(body).context("Registration body is not valid JSON")?;

    Ok(match value {
        Value::Object(map) => map,
        _ => Map::new(),
    })
}

/// Required fields whose value is absent or falsy (`null`, `""`, `false`, `0`).
#[must_use]
pub fn missing_required(payload: &Map<String, Value>) -> Vec<&'static str> {
    REQUIRED_FIELDS.into_iter().filter(|field| !payload.get(*field).is_some_and(is_filled)).collect()
}

#[allow(clippy::float_cmp)]
fn is_filled(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
