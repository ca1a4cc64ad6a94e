//! Event HTTP Routes
//!
//! Public, read-only event endpoints.

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use crate::state::AppState;
use crate::utils::errors::Result;
use super::extractors::{ValidEvent, ValidPage};

/// Create event routes
pub fn event_routes(state: AppState) -> Router {
    Router::new()
        .route("/events", get(list_events_handler))
        .route("/events/:event_id", get(get_event_handler))
        .route("/events/:event_id/rules", get(get_rules_handler))
        .with_state(state)
}

async fn list_events_handler(
    State(state): State<AppState>,
    ValidPage { page, limit }: ValidPage,
) -> Result<impl IntoResponse> {
    let events = state.services.event_service.list_events(page, limit).await?;
    Ok(Json(events))
}

async fn get_event_handler(
    State(state): State<AppState>,
    ValidEvent(request): ValidEvent,
) -> Result<impl IntoResponse> {
    let event = state.services.event_service.get_event(request.event_id).await?;
    Ok(Json(event))
}

async fn get_rules_handler(
    State(state): State<AppState>,
    ValidEvent(request): ValidEvent,
) -> Result<impl IntoResponse> {
    let rules = state.services.event_service.get_rules(request.event_id).await?;
    Ok(Json(rules))
}
