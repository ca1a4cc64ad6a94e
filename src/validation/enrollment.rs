//! Enrollment request validators
//!
//! Each endpoint composes exactly the validators for the request parts it
//! reads (path, path + query, path + body) and receives one normalized
//! request object back.

use std::fmt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::models::enrollment::EnrollmentStatus;
use crate::utils::helpers::calculate_offset;
use super::{ValidationError, ValidationErrorKind, ValidationResult};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 100;

/// Positive event identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(i64);

impl EventId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Positive team identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(i64);

impl TeamId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw pagination query exactly as it arrives in the URL
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPaginationQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub status: Option<String>,
}

/// Normalized pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationParams {
    pub page: u32,
    pub limit: u32,
    pub status: EnrollmentStatus,
}

impl PaginationParams {
    /// Row offset of the first item on this page
    pub fn offset(&self) -> i64 {
        calculate_offset(self.page, self.limit)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            status: EnrollmentStatus::default(),
        }
    }
}

/// Path-only request: enroll, cancel, stats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRequest {
    pub event_id: EventId,
}

/// Query-only request: the caller's own enrollments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserEnrollmentsRequest {
    pub status: EnrollmentStatus,
}

/// Path + query request: an event's enrollments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventEnrollmentsRequest {
    pub event_id: EventId,
    pub pagination: PaginationParams,
}

/// Path + body request: change the team of an enrollment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateTeamRequest {
    pub event_id: EventId,
    /// `None` means "no team change"
    pub team_id: Option<TeamId>,
}

fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// Validate an event id taken from the URL path
pub fn validate_event_id(raw: &str) -> ValidationResult<EventId> {
    match parse_integer(raw) {
        Some(id) if id > 0 => Ok(EventId(id)),
        _ => Err(ValidationError::new(
            ValidationErrorKind::InvalidEventId,
            "eventId",
            "Invalid event ID",
        )),
    }
}

/// Validate the optional `status` query parameter, defaulting to `Enrolled`
pub fn validate_enrollment_status_query(raw: Option<&str>) -> ValidationResult<EnrollmentStatus> {
    match raw {
        None => Ok(EnrollmentStatus::default()),
        Some(value) => value.parse(),
    }
}

/// Validate the `teamId` member of a team-association body.
///
/// An absent `teamId` is valid and yields `None`.
pub fn validate_team_association(raw: &Value) -> ValidationResult<Option<TeamId>> {
    let body = raw.as_object().ok_or_else(|| {
        ValidationError::new(
            ValidationErrorKind::MalformedRequest,
            "body",
            "Request body must be a JSON object",
        )
    })?;

    let team_id = match body.get("teamId") {
        None => return Ok(None),
        Some(value) => value,
    };

    let invalid = |message: &str| {
        ValidationError::new(ValidationErrorKind::InvalidTeamId, "teamId", message)
    };

    let number = match team_id {
        Value::Number(n) => n,
        _ => return Err(invalid("Team ID is required")),
    };

    let id = if let Some(id) = number.as_i64() {
        id
    } else if number.is_u64() {
        return Err(invalid("Team ID is out of range"));
    } else {
        // Whole floats such as `3.0` are integers for JSON clients
        let value = number.as_f64().unwrap_or(f64::NAN);
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(invalid("Team ID must be an integer"));
        }
        if value.abs() > i64::MAX as f64 {
            return Err(invalid("Team ID is out of range"));
        }
        value as i64
    };

    if id <= 0 {
        return Err(invalid("Team ID must be positive"));
    }

    Ok(Some(TeamId(id)))
}

/// Validate the optional `page` query parameter
pub fn validate_page(raw: Option<&str>) -> ValidationResult<u32> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_PAGE);
    };

    match parse_integer(raw) {
        Some(page) if page > 0 && page <= u32::MAX as i64 => Ok(page as u32),
        _ => Err(ValidationError::new(
            ValidationErrorKind::InvalidPage,
            "page",
            "Page must be a positive integer",
        )),
    }
}

/// Validate the optional `limit` query parameter. Out-of-range values are rejected.
pub fn validate_limit(raw: Option<&str>) -> ValidationResult<u32> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_LIMIT);
    };

    match parse_integer(raw) {
        Some(limit) if (1..=MAX_LIMIT as i64).contains(&limit) => Ok(limit as u32),
        _ => Err(ValidationError::new(
            ValidationErrorKind::InvalidLimit,
            "limit",
            format!("Limit must be an integer between 1 and {}", MAX_LIMIT),
        )),
    }
}

/// Validate pagination query parameters, applying defaults for absent fields
pub fn validate_pagination(raw: &RawPaginationQuery) -> ValidationResult<PaginationParams> {
    Ok(PaginationParams {
        page: validate_page(raw.page.as_deref())?,
        limit: validate_limit(raw.limit.as_deref())?,
        status: validate_enrollment_status_query(raw.status.as_deref())?,
    })
}

pub fn validate_event_request(raw_event_id: &str) -> ValidationResult<EventRequest> {
    Ok(EventRequest {
        event_id: validate_event_id(raw_event_id)?,
    })
}

pub fn validate_user_enrollments_request(raw_status: Option<&str>) -> ValidationResult<UserEnrollmentsRequest> {
    Ok(UserEnrollmentsRequest {
        status: validate_enrollment_status_query(raw_status)?,
    })
}

pub fn validate_event_enrollments_request(
    raw_event_id: &str,
    raw_query: &RawPaginationQuery,
) -> ValidationResult<EventEnrollmentsRequest> {
    Ok(EventEnrollmentsRequest {
        event_id: validate_event_id(raw_event_id)?,
        pagination: validate_pagination(raw_query)?,
    })
}

pub fn validate_update_team_request(raw_event_id: &str, raw_body: &Value) -> ValidationResult<UpdateTeamRequest> {
    Ok(UpdateTeamRequest {
        event_id: validate_event_id(raw_event_id)?,
        team_id: validate_team_association(raw_body)?,
    })
}
