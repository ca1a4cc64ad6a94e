//! # HTTP Module
//!
//! Axum router, request extractors and error rendering for the CodeArena API.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/events/*` - Events, enrollment, teams and statistics
//! - `/api/enrollments` - The caller's enrollments

pub mod error;
pub mod extractors;
pub mod enrollment_routes;
pub mod event_routes;
pub mod team_routes;
pub mod health_routes;
pub mod server;

pub use error::ErrorResponse;
pub use server::{build_router, HttpServer};
