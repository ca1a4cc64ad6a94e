//! Health check route

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use crate::state::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
}

/// Create health routes
pub fn health_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

/// 200 when every dependency answers, 503 otherwise
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let health = state.services.health_check().await;

    let (code, status) = if health.is_healthy() {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        database: health.database_healthy,
        issues: health.get_issues(),
    };

    (code, Json(response))
}
