//! Authentication middleware
//!
//! Resolves the caller of a protected endpoint from the `Authorization`
//! header. Handlers take an [`AuthContext`] argument to require a valid
//! bearer token; the request is rejected with 401 otherwise.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::debug;
use crate::services::auth::AuthContext;
use crate::state::AppState;
use crate::utils::errors::CodeArenaError;

#[async_trait]
impl FromRequestParts<AppState> for AuthContext {
    type Rejection = CodeArenaError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .map(|value| {
                value
                    .to_str()
                    .map_err(|_| CodeArenaError::Authentication("Malformed authorization header".to_string()))
            })
            .transpose()?;

        let auth = state.services.auth_service.authenticate_header(header)?;
        debug!(user_id = auth.user_id, role = %auth.role, path = %parts.uri.path(), "Request authenticated");

        Ok(auth)
    }
}
