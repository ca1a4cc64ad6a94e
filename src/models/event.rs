//! Event model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    /// Free-text rules, one per line
    pub rules: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub max_participants: Option<i32>,
    pub max_team_size: i32,
    pub is_active: bool,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Whether the event has reached capacity given the current enrolled count
    pub fn is_full(&self, enrolled: i64) -> bool {
        self.max_participants
            .map(|max| enrolled >= max as i64)
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub rules: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub max_participants: Option<i32>,
    pub max_team_size: i32,
    pub created_by: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(max_participants: Option<i32>) -> Event {
        Event {
            id: 1,
            title: "Rust Hack".to_string(),
            description: None,
            rules: None,
            start_date: Utc::now(),
            end_date: Utc::now(),
            max_participants,
            max_team_size: 4,
            is_active: true,
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_capacity() {
        assert!(event(Some(2)).is_full(2));
        assert!(!event(Some(2)).is_full(1));
        assert!(!event(None).is_full(10_000));
    }
}
