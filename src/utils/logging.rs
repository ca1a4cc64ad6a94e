//! Logging configuration and setup
//! 
//! This module provides logging initialization and structured logging utilities
//! for the CodeArena service.

use tracing::{info, warn, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use crate::config::LoggingConfig;
use crate::models::enrollment::EnrollmentStatus;
use crate::utils::errors::{CodeArenaError, Result};
use crate::validation::ValidationError;

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| CodeArenaError::Config(format!("Invalid log filter '{}': {}", config.level, e)))?;

    let (file_writer, guard) = if config.file_path.is_empty() {
        (None, None)
    } else {
        let file_appender = tracing_appender::rolling::daily(&config.file_path, "codearena.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        (Some(non_blocking), Some(guard))
    };

    let json = config.format == "json";
    let stdout_json = json.then(|| fmt::layer().json().with_writer(std::io::stdout));
    let stdout_pretty = (!json).then(|| fmt::layer().with_writer(std::io::stdout));
    let file_layer = file_writer.map(|writer| fmt::layer().json().with_ansi(false).with_writer(writer));

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_json)
        .with(stdout_pretty)
        .with(file_layer)
        .try_init()
        .map_err(|e| CodeArenaError::Config(format!("Failed to initialize logging: {}", e)))?;

    info!(level = %config.level, format = %config.format, "Logging initialized");
    Ok(guard)
}

/// Log enrollment lifecycle actions
pub fn log_enrollment_action(event_id: i64, user_id: i64, action: &str, status: EnrollmentStatus) {
    info!(
        event_id = event_id,
        user_id = user_id,
        action = action,
        status = %status,
        "Enrollment action performed"
    );
}

/// Log waitlist promotion
pub fn log_waitlist_promotion(event_id: i64, promoted_user_id: i64, freed_by_user_id: i64) {
    info!(
        event_id = event_id,
        promoted_user_id = promoted_user_id,
        freed_by_user_id = freed_by_user_id,
        "Waitlisted participant promoted"
    );
}

/// Log team actions
pub fn log_team_action(event_id: i64, team_id: i64, action: &str, user_id: i64) {
    info!(
        event_id = event_id,
        team_id = team_id,
        action = action,
        user_id = user_id,
        "Team action performed"
    );
}

/// Log rejected request input
pub fn log_validation_failure(error: &ValidationError) {
    debug!(
        field = error.field,
        code = error.kind.code(),
        message = %error.message,
        "Request validation failed"
    );
}

/// Log authorization refusals
pub fn log_access_denied(user_id: i64, action: &str, reason: &str) {
    warn!(
        user_id = user_id,
        action = action,
        reason = reason,
        "Access denied"
    );
}
