//! Test data helpers for creating users and events

use chrono::{Duration, Utc};
use uuid::Uuid;

use codearena::database::DatabaseService;
use codearena::models::event::{CreateEventRequest, Event};
use codearena::models::user::{CreateUserRequest, User};

/// Create a user with a unique name
pub async fn create_test_user(db: &DatabaseService, role: &str) -> User {
    let suffix = &Uuid::new_v4().simple().to_string()[..8];

    db.users
        .create(CreateUserRequest {
            username: format!("{}_{}", role, suffix),
            email: format!("{}_{}@codearena.test", role, suffix),
            role: Some(role.to_string()),
        })
        .await
        .expect("Failed to create test user")
}

/// Create an event starting next week
pub async fn create_test_event(
    db: &DatabaseService,
    created_by: i64,
    max_participants: Option<i32>,
    max_team_size: i32,
) -> Event {
    let start = Utc::now() + Duration::days(7);

    db.events
        .create(CreateEventRequest {
            title: "Rust Hackathon".to_string(),
            description: Some("48 hours of building".to_string()),
            rules: Some("- Teams of up to four\n- Submit before the deadline\n- Be kind".to_string()),
            start_date: start,
            end_date: start + Duration::days(2),
            max_participants,
            max_team_size,
            created_by: Some(created_by),
        })
        .await
        .expect("Failed to create test event")
}
