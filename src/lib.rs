//! CodeArena enrollment service
//!
//! HTTP API for hackathon and coding-contest enrollment: participants
//! enroll in events, form teams and cancel, while organizers list
//! enrollments and read statistics. All request input passes through the
//! validators in [`validation`] before any business logic runs.

pub mod config;
pub mod database;
pub mod http;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{CodeArenaError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use http::{build_router, HttpServer};
pub use services::ServiceFactory;
pub use state::AppState;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
