use super::function::{FunctionRequest, FunctionResponse, handle};
use axum::Router;
use axum::body::Bytes;
use axum::extract::DefaultBodyLimit;
use axum::extract::rejection::BytesRejection;
use axum::http::Method;
use axum::routing::any;
use summit_kernel::domain::constants::REGISTRATION_TAG;
use summit_kernel::domain::submission::{MessageBody, Submission};
use utoipa::OpenApi;

/// `OpenAPI` description of the registration function.
#[derive(OpenApi)]
#[openapi(paths(register_handler), components(schemas(Submission, MessageBody)))]
pub struct RegistrationApi;

/// Mounts the function on `path` for every HTTP method; method checks happen in [`handle`].
///
/// Bodies larger than `max_body_bytes` are answered with a JSON `413` carrying the usual
/// CORS headers. `path` must already be validated by [`crate::init`]; the router panics on
/// capture syntax it cannot parse.
pub fn registration_router<S>(path: &str, max_body_bytes: usize) -> Router<S>
where
    S: Send + Sync + Clone + 'static,
{
    Router::new()
        .route(path, any(register_handler))
        .layer(DefaultBodyLimit::max(max_body_bytes))
}

#[allow(clippy::unused_async)]
#[utoipa::path(
    post,
    path = "/.netlify/functions/register",
    request_body(content = Submission, description = "Form fields; `name` and `college` are required"),
    responses(
        (status = 200, description = "Registration accepted", body = MessageBody),
        (status = 204, description = "CORS pre-flight (OPTIONS)"),
        (status = 400, description = "Missing required fields", body = MessageBody),
        (status = 405, description = "Method other than POST or OPTIONS", body = MessageBody),
        (status = 413, description = "Body exceeds the configured limit", body = MessageBody),
        (status = 500, description = "Body is not valid JSON", body = MessageBody),
    ),
    tag = REGISTRATION_TAG,
)]
pub async fn register_handler(
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> FunctionResponse {
    match body {
        Ok(body) => handle(&FunctionRequest { method, body }),
        Err(rejection) => FunctionResponse::body_rejected(&rejection),
    }
}
