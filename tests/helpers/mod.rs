//! Test helpers module
//!
//! Settings, application state, tokens and request/response plumbing
//! shared by the integration tests.

#![allow(dead_code)]

pub mod database_helper;
pub mod test_data;

pub use database_helper::*;
pub use test_data::*;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use std::sync::Once;
use tower::ServiceExt;

use codearena::config::Settings;
use codearena::database::{create_lazy_pool, DatabaseConfig};
use codearena::http::build_router;
use codearena::services::Role;
use codearena::state::AppState;

pub const TEST_JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";

static INIT: Once = Once::new();

/// Install a test subscriber once per test binary
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("codearena=debug")
            .with_test_writer()
            .try_init();
    });
}

/// Settings suitable for tests. The database URL comes from
/// `TEST_DATABASE_URL` when set.
pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.auth.jwt_secret = TEST_JWT_SECRET.to_string();
    settings.server.cors_origins = Vec::new();
    settings.database.min_connections = 0;
    settings.database.acquire_timeout_seconds = 1;

    if let Ok(url) = std::env::var("TEST_DATABASE_URL") {
        settings.database.url = url;
    }

    settings
}

/// Application state over a pool that never connects unless used.
/// Enough for every request that is rejected before reaching the database.
pub fn lazy_state() -> AppState {
    init_test_logging();

    let settings = test_settings();
    let pool = create_lazy_pool(&DatabaseConfig::from(&settings.database))
        .expect("Failed to create lazy pool");

    AppState::new(&settings, pool)
}

pub fn router_for(state: AppState) -> Router {
    build_router(state, &test_settings().server)
}

/// Signed bearer token for a user
pub fn bearer(state: &AppState, user_id: i64, role: Role) -> String {
    let token = state
        .services
        .auth_service
        .issue_token(user_id, role)
        .expect("Failed to issue token");

    format!("Bearer {}", token)
}

/// Send one request through the router
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }

    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    router
        .clone()
        .oneshot(builder.body(body).expect("Failed to build request"))
        .await
        .expect("Router is infallible")
}

/// Split a response into its status and JSON body
pub async fn json_response(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Response body is not JSON")
    };

    (status, body)
}
