//! Error response rendering
//!
//! Every failure leaves the service as a JSON envelope:
//! `{"error": CODE, "message": text, "field": name?}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use crate::utils::errors::CodeArenaError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl From<&CodeArenaError> for ErrorResponse {
    fn from(err: &CodeArenaError) -> Self {
        match err {
            CodeArenaError::Validation(e) => Self {
                error: e.kind.code().to_string(),
                message: e.message.clone(),
                field: Some(e.field.to_string()),
            },
            // Internal details stay in the logs
            e if e.is_server_error() => Self {
                error: e.code().to_string(),
                message: "Internal server error".to_string(),
                field: None,
            },
            e => Self {
                error: e.code().to_string(),
                message: e.to_string(),
                field: None,
            },
        }
    }
}

impl IntoResponse for CodeArenaError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.is_server_error() {
            error!(error = %self, severity = %self.severity(), "Request failed");
        } else {
            debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}
