pub mod auth;
pub mod packages;
pub mod payments;
pub mod reports;
pub mod vehicles;

use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

/// Service health
///
/// Reports the status of Postgres and the session store.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Healthy or degraded", body = crate::health::HealthResponse),
        (status = 503, description = "Unhealthy", body = crate::health::HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let health_response = state.health_checker.check_all().await;

    let status_code = match health_response.status.as_str() {
        "healthy" | "degraded" => StatusCode::OK,
        _ => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health_response))
}

pub async fn openapi_json() -> impl IntoResponse {
    use utoipa::OpenApi;
    Json(crate::ApiDoc::openapi())
}
