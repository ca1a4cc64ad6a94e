//! Team HTTP Routes

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use crate::services::auth::AuthContext;
use crate::state::AppState;
use crate::utils::errors::Result;
use super::extractors::{ValidCreateTeam, ValidEvent};

/// Create team routes
pub fn team_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/events/:event_id/teams",
            get(list_teams_handler).post(create_team_handler),
        )
        .route("/events/:event_id/teams/stats", get(team_stats_handler))
        .with_state(state)
}

async fn list_teams_handler(
    State(state): State<AppState>,
    ValidEvent(request): ValidEvent,
) -> Result<impl IntoResponse> {
    let teams = state.services.team_service.list_teams(request.event_id).await?;
    Ok(Json(teams))
}

async fn create_team_handler(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidCreateTeam(request): ValidCreateTeam,
) -> Result<impl IntoResponse> {
    let team = state.services.team_service.create_team(&auth, request).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

async fn team_stats_handler(
    State(state): State<AppState>,
    ValidEvent(request): ValidEvent,
    auth: AuthContext,
) -> Result<impl IntoResponse> {
    let stats = state.services.team_service.team_stats(&auth, request.event_id).await?;
    Ok(Json(stats))
}
