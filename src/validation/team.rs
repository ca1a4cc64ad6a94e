//! Team request validators

use serde_json::Value;
use super::enrollment::{validate_event_id, EventId};
use super::{ValidationError, ValidationErrorKind, ValidationResult};

pub const MAX_TEAM_NAME_LENGTH: usize = 100;

/// Path + body request: create a team for an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTeamRequest {
    pub event_id: EventId,
    pub name: String,
}

/// Validate a team name. Surrounding whitespace is trimmed.
pub fn validate_team_name(raw: Option<&Value>) -> ValidationResult<String> {
    let invalid = |message: String| {
        ValidationError::new(ValidationErrorKind::InvalidTeamName, "name", message)
    };

    let name = match raw {
        Some(Value::String(name)) => name.trim(),
        _ => return Err(invalid("Team name is required".to_string())),
    };

    if name.is_empty() {
        return Err(invalid("Team name cannot be empty".to_string()));
    }

    if name.chars().count() > MAX_TEAM_NAME_LENGTH {
        return Err(invalid(format!(
            "Team name must be at most {} characters",
            MAX_TEAM_NAME_LENGTH
        )));
    }

    Ok(name.to_string())
}

pub fn validate_create_team_request(raw_event_id: &str, raw_body: &Value) -> ValidationResult<CreateTeamRequest> {
    let event_id = validate_event_id(raw_event_id)?;
    let body = raw_body.as_object().ok_or_else(|| {
        ValidationError::new(
            ValidationErrorKind::MalformedRequest,
            "body",
            "Request body must be a JSON object",
        )
    })?;

    Ok(CreateTeamRequest {
        event_id,
        name: validate_team_name(body.get("name"))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_team_name_trimmed() {
        let request = validate_create_team_request("3", &json!({"name": "  Rustaceans "})).unwrap();
        assert_eq!(request.name, "Rustaceans");
        assert_eq!(request.event_id.get(), 3);
    }

    #[test]
    fn test_team_name_rejections() {
        for body in [json!({}), json!({"name": 12}), json!({"name": "   "})] {
            let err = validate_create_team_request("3", &body).unwrap_err();
            assert_eq!(err.kind, ValidationErrorKind::InvalidTeamName);
            assert_eq!(err.field, "name");
        }

        let long = "x".repeat(MAX_TEAM_NAME_LENGTH + 1);
        let err = validate_create_team_request("3", &json!({ "name": long })).unwrap_err();
        assert!(err.message.contains("at most 100"));
    }

    #[test]
    fn test_event_id_checked_first() {
        let err = validate_create_team_request("0", &json!({"name": ""})).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidEventId);
    }
}
