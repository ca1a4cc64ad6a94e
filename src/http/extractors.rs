//! Validating request extractors
//!
//! Each extractor reads the raw request parts an endpoint uses, runs the
//! matching validator and rejects the request with a field-level error
//! before the handler body runs.

use std::collections::HashMap;
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use serde_json::Value;
use crate::utils::errors::CodeArenaError;
use crate::utils::logging;
use crate::validation::{
    validate_create_team_request, validate_event_enrollments_request, validate_event_id, validate_event_request,
    validate_limit, validate_page, validate_update_team_request, validate_user_enrollments_request,
    CreateTeamRequest, EventEnrollmentsRequest, EventRequest, RawPaginationQuery, UpdateTeamRequest,
    UserEnrollmentsRequest, ValidationError, ValidationErrorKind,
};

fn rejected(error: ValidationError) -> CodeArenaError {
    logging::log_validation_failure(&error);
    CodeArenaError::Validation(error)
}

fn malformed(field: &'static str, message: &str) -> CodeArenaError {
    rejected(ValidationError::new(ValidationErrorKind::MalformedRequest, field, message))
}

/// Raw `event_id` path segment; empty when the route has none
async fn raw_event_id<S: Send + Sync>(parts: &mut Parts, state: &S) -> String {
    Path::<HashMap<String, String>>::from_request_parts(parts, state)
        .await
        .ok()
        .and_then(|Path(mut params)| params.remove("event_id"))
        .unwrap_or_default()
}

const PAGINATION_KEYS: &[&str] = &["page", "limit", "status"];
const PAGE_KEYS: &[&str] = &["page", "limit"];
const STATUS_KEYS: &[&str] = &["status"];

/// Gather the query keys an endpoint reads. A key given twice is reported
/// against that key; keys outside `used` are ignored.
fn collect_query(pairs: Vec<(String, String)>, used: &[&str]) -> Result<RawPaginationQuery, ValidationError> {
    let mut query = RawPaginationQuery::default();

    for (key, value) in pairs {
        if !used.iter().any(|k| *k == key) {
            continue;
        }

        let (slot, kind, field) = match key.as_str() {
            "page" => (&mut query.page, ValidationErrorKind::InvalidPage, "page"),
            "limit" => (&mut query.limit, ValidationErrorKind::InvalidLimit, "limit"),
            "status" => (&mut query.status, ValidationErrorKind::InvalidStatus, "status"),
            _ => continue,
        };

        if slot.replace(value).is_some() {
            return Err(ValidationError::new(kind, field, format!("{} must be given at most once", field)));
        }
    }

    Ok(query)
}

async fn raw_query<S: Send + Sync>(
    parts: &mut Parts,
    state: &S,
    used: &[&str],
) -> Result<RawPaginationQuery, CodeArenaError> {
    let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
        .await
        .map_err(|_| malformed("query", "Query string could not be parsed"))?;

    collect_query(pairs, used).map_err(rejected)
}

/// Read a JSON body. An empty body counts as an empty object.
async fn raw_json_body<S: Send + Sync>(req: Request, state: &S) -> Result<Value, CodeArenaError> {
    let bytes = Bytes::from_request(req, state)
        .await
        .map_err(|_| malformed("body", "Request body could not be read"))?;

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }

    serde_json::from_slice(&bytes).map_err(|_| malformed("body", "Request body must be valid JSON"))
}

/// Validated `event_id` path parameter
#[derive(Debug, Clone, Copy)]
pub struct ValidEvent(pub EventRequest);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for ValidEvent {
    type Rejection = CodeArenaError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = raw_event_id(parts, state).await;
        validate_event_request(&raw).map(ValidEvent).map_err(rejected)
    }
}

/// Validated `status` query parameter for the caller's enrollments
#[derive(Debug, Clone, Copy)]
pub struct ValidUserEnrollments(pub UserEnrollmentsRequest);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for ValidUserEnrollments {
    type Rejection = CodeArenaError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let query = raw_query(parts, state, STATUS_KEYS).await?;
        validate_user_enrollments_request(query.status.as_deref())
            .map(ValidUserEnrollments)
            .map_err(rejected)
    }
}

/// Validated `event_id` path parameter with pagination query
#[derive(Debug, Clone, Copy)]
pub struct ValidEventEnrollments(pub EventEnrollmentsRequest);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for ValidEventEnrollments {
    type Rejection = CodeArenaError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = raw_event_id(parts, state).await;
        let query = raw_query(parts, state, PAGINATION_KEYS).await?;
        validate_event_enrollments_request(&raw, &query)
            .map(ValidEventEnrollments)
            .map_err(rejected)
    }
}

/// Validated `page`/`limit` query for plain listings
#[derive(Debug, Clone, Copy)]
pub struct ValidPage {
    pub page: u32,
    pub limit: u32,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for ValidPage {
    type Rejection = CodeArenaError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let query = raw_query(parts, state, PAGE_KEYS).await?;
        Ok(ValidPage {
            page: validate_page(query.page.as_deref()).map_err(rejected)?,
            limit: validate_limit(query.limit.as_deref()).map_err(rejected)?,
        })
    }
}

/// Validated `event_id` path parameter with team-association body
#[derive(Debug, Clone, Copy)]
pub struct ValidTeamAssociation(pub UpdateTeamRequest);

#[async_trait]
impl<S: Send + Sync> FromRequest<S> for ValidTeamAssociation {
    type Rejection = CodeArenaError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();
        let raw = raw_event_id(&mut parts, state).await;

        // A bad event id is reported before a malformed body
        if let Err(error) = validate_event_id(&raw) {
            return Err(rejected(error));
        }

        let body = raw_json_body(Request::from_parts(parts, body), state).await?;
        validate_update_team_request(&raw, &body)
            .map(ValidTeamAssociation)
            .map_err(rejected)
    }
}

/// Validated `event_id` path parameter with team-creation body
#[derive(Debug, Clone)]
pub struct ValidCreateTeam(pub CreateTeamRequest);

#[async_trait]
impl<S: Send + Sync> FromRequest<S> for ValidCreateTeam {
    type Rejection = CodeArenaError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();
        let raw = raw_event_id(&mut parts, state).await;

        if let Err(error) = validate_event_id(&raw) {
            return Err(rejected(error));
        }

        let body = raw_json_body(Request::from_parts(parts, body), state).await?;
        validate_create_team_request(&raw, &body)
            .map(ValidCreateTeam)
            .map_err(rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_collect_query_keeps_used_keys() {
        let query = collect_query(pairs(&[("page", "2"), ("limit", "5"), ("sort", "asc")]), PAGINATION_KEYS).unwrap();
        assert_eq!(query.page.as_deref(), Some("2"));
        assert_eq!(query.limit.as_deref(), Some("5"));
        assert!(query.status.is_none());
    }

    #[test]
    fn test_repeated_key_is_reported_against_that_field() {
        let err = collect_query(pairs(&[("limit", "5"), ("limit", "500")]), PAGINATION_KEYS).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidLimit);
        assert_eq!(err.field, "limit");

        let err = collect_query(pairs(&[("page", "1"), ("page", "2")]), PAGINATION_KEYS).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidPage);
        assert_eq!(err.field, "page");
    }

    #[test]
    fn test_repeated_unused_key_is_ignored() {
        let query = collect_query(pairs(&[("page", "1"), ("page", "2"), ("status", "Waitlisted")]), STATUS_KEYS).unwrap();
        assert_eq!(query.status.as_deref(), Some("Waitlisted"));
        assert!(query.page.is_none());
    }
}
