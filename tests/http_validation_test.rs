//! HTTP-level request validation tests
//!
//! Every request here is rejected before the database is touched, so the
//! router runs over a lazy pool that never connects.

mod helpers;

use axum::http::{Method, StatusCode};
use helpers::*;

use codearena::services::Role;

#[tokio::test]
async fn test_invalid_event_id_is_rejected() {
    let router = router_for(lazy_state());

    for uri in ["/api/events/abc", "/api/events/0", "/api/events/-4", "/api/events/1.5/rules"] {
        let response = send(&router, Method::GET, uri, None, None).await;
        let (status, body) = json_response(response).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {}", uri);
        assert_eq!(body["error"], "INVALID_EVENT_ID");
        assert_eq!(body["field"], "eventId");
        assert_eq!(body["message"], "Invalid event ID");
    }
}

#[tokio::test]
async fn test_validation_runs_before_authentication() {
    let router = router_for(lazy_state());

    let response = send(&router, Method::POST, "/api/events/abc/enrollment", None, None).await;
    let (status, body) = json_response(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_EVENT_ID");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let router = router_for(lazy_state());

    let response = send(&router, Method::GET, "/api/enrollments", None, None).await;
    let (status, body) = json_response(response).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");
    assert!(body.get("field").is_none());

    let response = send(&router, Method::DELETE, "/api/events/7/enrollment", Some("Bearer not-a-jwt"), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_status_is_rejected() {
    let state = lazy_state();
    let token = bearer(&state, 1, Role::Participant);
    let router = router_for(state);

    let response = send(&router, Method::GET, "/api/enrollments?status=Pending", Some(&token), None).await;
    let (status, body) = json_response(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_STATUS");
    assert_eq!(body["field"], "status");

    // Matching is case-sensitive
    let response = send(&router, Method::GET, "/api/enrollments?status=enrolled", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_pagination_bounds() {
    let router = router_for(lazy_state());

    let cases = [
        ("/api/events?limit=101", "INVALID_LIMIT", "limit"),
        ("/api/events?limit=0", "INVALID_LIMIT", "limit"),
        ("/api/events?limit=ten", "INVALID_LIMIT", "limit"),
        ("/api/events?page=0", "INVALID_PAGE", "page"),
        ("/api/events?page=-1", "INVALID_PAGE", "page"),
        ("/api/events/3/enrollments?limit=500", "INVALID_LIMIT", "limit"),
        ("/api/events/3/enrollments?status=Done", "INVALID_STATUS", "status"),
    ];

    for (uri, code, field) in cases {
        let response = send(&router, Method::GET, uri, None, None).await;
        let (status, body) = json_response(response).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {}", uri);
        assert_eq!(body["error"], code, "uri: {}", uri);
        assert_eq!(body["field"], field, "uri: {}", uri);
    }
}

#[tokio::test]
async fn test_invalid_team_id_is_rejected() {
    let state = lazy_state();
    let token = bearer(&state, 1, Role::Participant);
    let router = router_for(state);

    for body in [r#"{"teamId": 0}"#, r#"{"teamId": -3}"#, r#"{"teamId": 1.5}"#, r#"{"teamId": "2"}"#] {
        let response = send(&router, Method::PATCH, "/api/events/5/enrollment/team", Some(&token), Some(body)).await;
        let (status, json) = json_response(response).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(json["error"], "INVALID_TEAM_ID");
        assert_eq!(json["field"], "teamId");
    }
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let state = lazy_state();
    let token = bearer(&state, 1, Role::Participant);
    let router = router_for(state);

    for body in ["{not json", "[1, 2]"] {
        let response = send(&router, Method::PATCH, "/api/events/5/enrollment/team", Some(&token), Some(body)).await;
        let (status, json) = json_response(response).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(json["error"], "MALFORMED_REQUEST");
        assert_eq!(json["field"], "body");
    }
}

#[tokio::test]
async fn test_team_name_is_validated() {
    let state = lazy_state();
    let token = bearer(&state, 1, Role::Participant);
    let router = router_for(state);

    let response = send(&router, Method::POST, "/api/events/5/teams", Some(&token), Some(r#"{"name": "   "}"#)).await;
    let (status, body) = json_response(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_TEAM_NAME");
    assert_eq!(body["field"], "name");
}

#[tokio::test]
async fn test_participants_cannot_read_organizer_views() {
    let state = lazy_state();
    let token = bearer(&state, 1, Role::Participant);
    let router = router_for(state);

    for uri in [
        "/api/events/5/enrollments",
        "/api/events/5/enrollments/stats",
        "/api/events/5/teams/stats",
    ] {
        let response = send(&router, Method::GET, uri, Some(&token), None).await;
        let (status, body) = json_response(response).await;

        assert_eq!(status, StatusCode::FORBIDDEN, "uri: {}", uri);
        assert_eq!(body["error"], "FORBIDDEN");
    }
}

#[tokio::test]
async fn test_health_reports_unreachable_database() {
    let mut settings = test_settings();
    settings.database.url = "postgresql://codearena@127.0.0.1:1/unreachable".to_string();

    let pool = codearena::database::create_lazy_pool(&codearena::database::DatabaseConfig::from(&settings.database))
        .expect("Failed to create lazy pool");
    let router = router_for(codearena::state::AppState::new(&settings, pool));

    let response = send(&router, Method::GET, "/health", None, None).await;
    let (status, body) = json_response(response).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"], false);
}

#[tokio::test]
async fn test_repeated_query_key_names_the_field() {
    let state = lazy_state();
    let token = bearer(&state, 1, Role::Participant);
    let router = router_for(state);

    let response = send(&router, Method::GET, "/api/events?limit=5&limit=500", None, None).await;
    let (status, body) = json_response(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_LIMIT");
    assert_eq!(body["field"], "limit");

    let uri = "/api/enrollments?status=Enrolled&status=Cancelled";
    let (status, body) = json_response(send(&router, Method::GET, uri, Some(&token), None).await).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_STATUS");
    assert_eq!(body["field"], "status");

    // page is not read by this endpoint, so repeating it is not a validation error
    let response = send(&router, Method::GET, "/api/enrollments?page=1&page=2", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
