use super::state::ApiState;
use axum::extract::State;
use axum::http::header;
use axum::{Json, response::IntoResponse};
use serde::Serialize;
use std::sync::LazyLock;
use std::time::Instant;
use summit_domain::constants::SYSTEM_TAG;
use utoipa::ToSchema;

static STARTED: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Liveness report of a running deployment.
#[derive(Debug, Serialize, ToSchema)]
pub(super) struct HealthReport {
    status: &'static str,
    version: &'static str,
    uptime_secs: u64,
    /// Registered feature slices.
    features: Vec<&'static str>,
    /// Route the registration function answers on.
    function_path: String,
}

impl HealthReport {
    fn of(state: &ApiState) -> Self {
        Self {
            status: "up",
            version: env!("CARGO_PKG_VERSION"),
            uptime_secs: STARTED.elapsed().as_secs(),
            features: state.slice_names(),
            function_path: state.config.registration.function_path.clone(),
        }
    }
}

#[allow(clippy::unused_async)]
#[utoipa::path(
    get,
    path = "/health",
    responses((status = OK, description = "Service is up", body = HealthReport)),
    tag = SYSTEM_TAG,
)]
pub(super) async fn health_handler(State(state): State<ApiState>) -> impl IntoResponse {
    ([(header::CACHE_CONTROL, "no-store")], Json(HealthReport::of(&state)))
}
