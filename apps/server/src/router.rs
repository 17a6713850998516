use axum::Router;
use summit::features::registration::Registration;
use summit::kernel::prelude::{ApiState, ApiStateError};
use summit::server::router::{RegistrationApi, registration_router, system_router};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(info(title = "Summit registration API"))]
struct ApiDoc;

/// Assembles the application router: system routes, the registration function, the Scalar
/// UI at `/api` and, when configured, the static site as the fallback.
///
/// # Errors
/// Returns [`ApiStateError::MissingSlice`] if the registration slice was not registered.
#[allow(unreachable_pub)]
pub fn init(state: ApiState) -> Result<Router, ApiStateError> {
    let registration = state.try_get_slice::<Registration>()?;
    let function_routes =
        registration_router(&registration.function_path, registration.max_body_bytes);
    let static_dir = state.config.storage.static_dir.clone();

    let mut api = ApiDoc::openapi();
    api.merge(RegistrationApi::openapi());

    // Separate the OpenAPI routes and the API documentation object
    let (openapi_routes, api_doc) = OpenApiRouter::with_openapi(api)
        .merge(system_router())
        .with_state(state)
        .split_for_parts();

    let mut router = Router::new()
        .merge(openapi_routes)
        .merge(function_routes)
        .merge(Scalar::with_url("/api", api_doc));

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    Ok(router.layer(TraceLayer::new_for_http()))
}
