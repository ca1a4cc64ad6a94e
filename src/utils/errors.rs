//! Error handling for CodeArena
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;
use crate::validation::ValidationError;

/// Main error type for the CodeArena service
#[derive(Error, Debug)]
pub enum CodeArenaError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: i64 },

    #[error("Team not found: {team_id}")]
    TeamNotFound { team_id: i64 },

    #[error("No active enrollment for event {event_id}")]
    EnrollmentNotFound { event_id: i64 },

    #[error("Already enrolled in event {event_id}")]
    AlreadyEnrolled { event_id: i64 },

    #[error("Enrollment is closed for event {event_id}")]
    EnrollmentClosed { event_id: i64 },

    #[error("Team {team_id} is full ({max_size} members)")]
    TeamFull { team_id: i64, max_size: i32 },

    #[error("Team name already taken: {name}")]
    TeamNameTaken { name: String },

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for CodeArena operations
pub type Result<T> = std::result::Result<T, CodeArenaError>;

impl CodeArenaError {
    /// Check if the caller can recover by correcting input and retrying
    pub fn is_recoverable(&self) -> bool {
        match self {
            CodeArenaError::Validation(_) => true,
            CodeArenaError::Database(_) => false,
            CodeArenaError::Migration(_) => false,
            CodeArenaError::Config(_) => false,
            CodeArenaError::PermissionDenied(_) => false,
            CodeArenaError::Authentication(_) => true,
            CodeArenaError::EventNotFound { .. } => false,
            CodeArenaError::TeamNotFound { .. } => true,
            CodeArenaError::EnrollmentNotFound { .. } => false,
            CodeArenaError::AlreadyEnrolled { .. } => false,
            CodeArenaError::EnrollmentClosed { .. } => false,
            CodeArenaError::TeamFull { .. } => true,
            CodeArenaError::TeamNameTaken { .. } => true,
            CodeArenaError::InvalidStateTransition { .. } => false,
            CodeArenaError::Serialization(_) => false,
            CodeArenaError::Io(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CodeArenaError::Database(_) => ErrorSeverity::Critical,
            CodeArenaError::Migration(_) => ErrorSeverity::Critical,
            CodeArenaError::Config(_) => ErrorSeverity::Critical,
            CodeArenaError::PermissionDenied(_) => ErrorSeverity::Warning,
            CodeArenaError::Authentication(_) => ErrorSeverity::Warning,
            CodeArenaError::Serialization(_) | CodeArenaError::Io(_) => ErrorSeverity::Error,
            _ => ErrorSeverity::Info,
        }
    }

    /// HTTP status code this error is reported with
    pub fn status_code(&self) -> u16 {
        match self {
            CodeArenaError::Validation(_) => 400,
            CodeArenaError::Authentication(_) => 401,
            CodeArenaError::PermissionDenied(_) => 403,
            CodeArenaError::EventNotFound { .. }
            | CodeArenaError::TeamNotFound { .. }
            | CodeArenaError::EnrollmentNotFound { .. } => 404,
            CodeArenaError::AlreadyEnrolled { .. }
            | CodeArenaError::EnrollmentClosed { .. }
            | CodeArenaError::TeamFull { .. }
            | CodeArenaError::TeamNameTaken { .. }
            | CodeArenaError::InvalidStateTransition { .. } => 409,
            CodeArenaError::Database(_)
            | CodeArenaError::Migration(_)
            | CodeArenaError::Config(_)
            | CodeArenaError::Serialization(_)
            | CodeArenaError::Io(_) => 500,
        }
    }

    /// Machine-readable error code used in the response envelope
    pub fn code(&self) -> &'static str {
        match self {
            CodeArenaError::Validation(e) => e.kind.code(),
            CodeArenaError::Authentication(_) => "UNAUTHORIZED",
            CodeArenaError::PermissionDenied(_) => "FORBIDDEN",
            CodeArenaError::EventNotFound { .. } => "EVENT_NOT_FOUND",
            CodeArenaError::TeamNotFound { .. } => "TEAM_NOT_FOUND",
            CodeArenaError::EnrollmentNotFound { .. } => "ENROLLMENT_NOT_FOUND",
            CodeArenaError::AlreadyEnrolled { .. } => "ALREADY_ENROLLED",
            CodeArenaError::EnrollmentClosed { .. } => "ENROLLMENT_CLOSED",
            CodeArenaError::TeamFull { .. } => "TEAM_FULL",
            CodeArenaError::TeamNameTaken { .. } => "TEAM_NAME_TAKEN",
            CodeArenaError::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",
            _ => "INTERNAL_ERROR",
        }
    }

    /// Whether the error originates on the server side
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
