use super::health;
use super::state::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Platform routes every deployment exposes (`/health`).
pub fn system_router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(health::health_handler))
}
