use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cuba_telemetry::HealthStatus;

use super::AppState;

pub async fn health(State(state): State<AppState>) -> Response {
    let mut health = HealthStatus::new();
    match state.service.count().await {
        Ok(count) => health.add_check("store", true, Some(format!("{} bank accounts", count))),
        Err(e) => health.add_check("store", false, Some(e.to_string())),
    }

    let status = if health.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(health)).into_response()
}
