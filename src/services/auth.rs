//! Authentication service implementation
//!
//! This service issues and verifies bearer tokens and exposes the role
//! predicates the dashboard uses to decide what a user may see and do.

use std::fmt;
use std::str::FromStr;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use crate::config::settings::AuthSettings;
use crate::utils::errors::{CodeArenaError, Result};

/// Platform roles, ordered by privilege
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Participant,
    Organizer,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Participant => "participant",
            Role::Organizer => "organizer",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CodeArenaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "participant" => Ok(Role::Participant),
            "organizer" => Ok(Role::Organizer),
            "admin" => Ok(Role::Admin),
            other => Err(CodeArenaError::Authentication(format!("Unknown role: {}", other))),
        }
    }
}

/// Token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: i64,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
}

/// Authenticated caller of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: i64,
    pub role: Role,
}

impl AuthContext {
    pub fn new(user_id: i64, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Organizers and admins
    pub fn is_organizer(&self) -> bool {
        self.role >= Role::Organizer
    }

    pub fn is_participant(&self) -> bool {
        self.role == Role::Participant
    }

    /// Admins manage every event; organizers manage the events they created.
    ///
    /// No endpoint edits events yet, so nothing in this crate calls it. It is
    /// part of the role API for consumers of the library.
    pub fn can_manage_event(&self, created_by: Option<i64>) -> bool {
        self.is_admin() || (self.role == Role::Organizer && created_by == Some(self.user_id))
    }

    /// Enrollment and team statistics are visible to any organizer or admin
    pub fn can_view_event_stats(&self) -> bool {
        self.is_organizer()
    }

    /// Fail with `PermissionDenied` unless the caller is an organizer or admin
    pub fn require_organizer(&self, action: &str) -> Result<()> {
        self.require(self.is_organizer(), action, "organizer role required")
    }

    /// Fail with `PermissionDenied` unless the caller may read event statistics
    pub fn require_stats_viewer(&self, action: &str) -> Result<()> {
        self.require(self.can_view_event_stats(), action, "statistics are limited to organizers")
    }

    fn require(&self, allowed: bool, action: &str, reason: &str) -> Result<()> {
        if allowed {
            return Ok(());
        }

        crate::utils::logging::log_access_denied(self.user_id, action, reason);
        Err(CodeArenaError::PermissionDenied(format!(
            "Organizer privileges required to {}",
            action
        )))
    }
}

/// Authentication service for issuing and verifying tokens
#[derive(Clone)]
pub struct AuthService {
    issuer: String,
    token_ttl: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(settings: &AuthSettings) -> Self {
        Self {
            issuer: settings.issuer.clone(),
            token_ttl: Duration::minutes(settings.token_ttl_minutes),
            encoding_key: EncodingKey::from_secret(settings.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.jwt_secret.as_bytes()),
        }
    }

    /// Issue a signed token for a user
    pub fn issue_token(&self, user_id: i64, role: Role) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            role,
            iat: now.timestamp(),
            exp: (now + self.token_ttl).timestamp(),
            iss: self.issuer.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| CodeArenaError::Authentication(format!("Failed to issue token: {}", e)))
    }

    /// Verify a token and build the caller context
    pub fn verify_token(&self, token: &str) -> Result<AuthContext> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            let reason = match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => "Token expired",
                jsonwebtoken::errors::ErrorKind::InvalidSignature => "Invalid token signature",
                jsonwebtoken::errors::ErrorKind::InvalidIssuer => "Invalid token issuer",
                _ => "Malformed token",
            };
            warn!(reason = reason, "Token verification failed");
            CodeArenaError::Authentication(reason.to_string())
        })?;

        if data.claims.sub <= 0 {
            return Err(CodeArenaError::Authentication("Malformed token".to_string()));
        }

        debug!(user_id = data.claims.sub, role = %data.claims.role, "Token verified");
        Ok(AuthContext::new(data.claims.sub, data.claims.role))
    }

    /// Verify an `Authorization` header value of the form `Bearer <token>`
    pub fn authenticate_header(&self, header: Option<&str>) -> Result<AuthContext> {
        let header = header
            .ok_or_else(|| CodeArenaError::Authentication("Missing authorization header".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| CodeArenaError::Authentication("Expected a bearer token".to_string()))?;

        self.verify_token(token)
    }
}
