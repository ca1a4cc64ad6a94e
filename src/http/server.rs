//! # HTTP Server
//!
//! Combines the route groups into one router and serves it.
//!
//! The health check lives at the root; every other endpoint is nested
//! under `/api`.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};

use crate::config::settings::{ServerSettings, Settings};
use crate::middleware::trace_layer;
use crate::state::AppState;
use crate::utils::errors::{CodeArenaError, Result};
use super::enrollment_routes::enrollment_routes;
use super::event_routes::event_routes;
use super::health_routes::health_routes;
use super::team_routes::team_routes;

/// Build the combined router with all endpoints
pub fn build_router(state: AppState, server: &ServerSettings) -> Router {
    let api = Router::new()
        .merge(event_routes(state.clone()))
        .merge(enrollment_routes(state.clone()))
        .merge(team_routes(state.clone()));

    Router::new()
        .merge(health_routes(state))
        .nest("/api", api)
        .layer(trace_layer())
        .layer(cors_layer(&server.cors_origins))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        // No origins configured: permissive, for development
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let parsed: Vec<_> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring unparsable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// HTTP server for the CodeArena API
pub struct HttpServer {
    addr: String,
    router: Router,
}

impl HttpServer {
    pub fn new(settings: &Settings, state: AppState) -> Self {
        Self {
            addr: settings.socket_addr(),
            router: build_router(state, &settings.server),
        }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> &str {
        &self.addr
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl+C is received
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = self.addr.parse().map_err(|e| {
            CodeArenaError::Config(format!("Invalid socket address {}: {}", self.addr, e))
        })?;

        let listener = TcpListener::bind(addr).await?;
        info!(address = %addr, "CodeArena API listening");
        info!("Health check: http://{}/health", addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("HTTP server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        // Without a signal handler, keep serving
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
