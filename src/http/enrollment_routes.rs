//! Enrollment HTTP Routes
//!
//! Enroll, cancel, team association, listings and statistics. Every route
//! here requires a bearer token. Request input is validated by the
//! extractors before the caller is authenticated.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use crate::models::enrollment::EnrollmentStatus;
use crate::services::auth::AuthContext;
use crate::state::AppState;
use crate::utils::errors::Result;
use super::extractors::{ValidEvent, ValidEventEnrollments, ValidTeamAssociation, ValidUserEnrollments};

/// Create enrollment routes
pub fn enrollment_routes(state: AppState) -> Router {
    Router::new()
        .route("/enrollments", get(list_user_enrollments_handler))
        .route(
            "/events/:event_id/enrollment",
            post(enroll_handler).delete(cancel_handler),
        )
        .route("/events/:event_id/enrollment/team", patch(update_team_handler))
        .route("/events/:event_id/enrollments", get(list_event_enrollments_handler))
        .route("/events/:event_id/enrollments/stats", get(enrollment_stats_handler))
        .with_state(state)
}

/// 201 when a spot was taken, 202 when the caller landed on the waitlist
async fn enroll_handler(
    State(state): State<AppState>,
    ValidEvent(request): ValidEvent,
    auth: AuthContext,
) -> Result<impl IntoResponse> {
    let enrollment = state.services.enrollment_service.enroll(&auth, request.event_id).await?;

    let status = match enrollment.status {
        EnrollmentStatus::Waitlisted => StatusCode::ACCEPTED,
        _ => StatusCode::CREATED,
    };

    Ok((status, Json(enrollment)))
}

async fn cancel_handler(
    State(state): State<AppState>,
    ValidEvent(request): ValidEvent,
    auth: AuthContext,
) -> Result<impl IntoResponse> {
    let outcome = state.services.enrollment_service.cancel(&auth, request.event_id).await?;
    Ok(Json(outcome))
}

async fn update_team_handler(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidTeamAssociation(request): ValidTeamAssociation,
) -> Result<impl IntoResponse> {
    let enrollment = state.services.enrollment_service.update_team(&auth, request).await?;
    Ok(Json(enrollment))
}

async fn list_user_enrollments_handler(
    State(state): State<AppState>,
    ValidUserEnrollments(request): ValidUserEnrollments,
    auth: AuthContext,
) -> Result<impl IntoResponse> {
    let enrollments = state.services.enrollment_service.list_for_user(&auth, request).await?;
    Ok(Json(enrollments))
}

async fn list_event_enrollments_handler(
    State(state): State<AppState>,
    ValidEventEnrollments(request): ValidEventEnrollments,
    auth: AuthContext,
) -> Result<impl IntoResponse> {
    let page = state.services.enrollment_service.list_for_event(&auth, request).await?;
    Ok(Json(page))
}

async fn enrollment_stats_handler(
    State(state): State<AppState>,
    ValidEvent(request): ValidEvent,
    auth: AuthContext,
) -> Result<impl IntoResponse> {
    let stats = state.services.enrollment_service.stats(&auth, request.event_id).await?;
    Ok(Json(stats))
}
