//! Request validation module
//!
//! Pure validators that turn raw request input (path segments, query strings,
//! loosely typed JSON bodies) into normalized values before any business
//! logic runs. Nothing in here touches the database.

pub mod enrollment;
pub mod team;

pub use enrollment::{
    validate_event_id, validate_enrollment_status_query, validate_team_association,
    validate_pagination, validate_page, validate_limit,
    validate_event_request, validate_user_enrollments_request,
    validate_event_enrollments_request, validate_update_team_request,
    EventId, TeamId, PaginationParams, RawPaginationQuery,
    EventRequest, UserEnrollmentsRequest, EventEnrollmentsRequest, UpdateTeamRequest,
    DEFAULT_PAGE, DEFAULT_LIMIT, MAX_LIMIT,
};
pub use team::{validate_team_name, CreateTeamRequest, validate_create_team_request};

use thiserror::Error;

/// Kind of validation failure, one per validated field family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    InvalidEventId,
    InvalidStatus,
    InvalidTeamId,
    InvalidPage,
    InvalidLimit,
    InvalidTeamName,
    MalformedRequest,
}

impl ValidationErrorKind {
    /// Machine-readable code reported to clients
    pub fn code(&self) -> &'static str {
        match self {
            ValidationErrorKind::InvalidEventId => "INVALID_EVENT_ID",
            ValidationErrorKind::InvalidStatus => "INVALID_STATUS",
            ValidationErrorKind::InvalidTeamId => "INVALID_TEAM_ID",
            ValidationErrorKind::InvalidPage => "INVALID_PAGE",
            ValidationErrorKind::InvalidLimit => "INVALID_LIMIT",
            ValidationErrorKind::InvalidTeamName => "INVALID_TEAM_NAME",
            ValidationErrorKind::MalformedRequest => "MALFORMED_REQUEST",
        }
    }
}

/// A single field that failed validation, with the reason
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, field: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            field,
            message: message.into(),
        }
    }
}

/// Result type alias for validators
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;
