//! Configuration validation module
//! 
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{CodeArenaError, Result};
use super::Settings;

/// Minimum accepted length of the token signing secret
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_auth_config(&settings.auth)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate server configuration
fn validate_server_config(config: &super::ServerSettings) -> Result<()> {
    if config.host.is_empty() {
        return Err(CodeArenaError::Config(
            "Server host is required".to_string()
        ));
    }

    if config.port == 0 {
        return Err(CodeArenaError::Config(
            "Server port must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseSettings) -> Result<()> {
    if config.url.is_empty() {
        return Err(CodeArenaError::Config(
            "Database URL is required".to_string()
        ));
    }
    
    if config.max_connections == 0 {
        return Err(CodeArenaError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }
    
    if config.min_connections > config.max_connections {
        return Err(CodeArenaError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }
    
    Ok(())
}

/// Validate token configuration
fn validate_auth_config(config: &super::AuthSettings) -> Result<()> {
    if config.jwt_secret.is_empty() {
        return Err(CodeArenaError::Config(
            "JWT secret is required".to_string()
        ));
    }

    if config.jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
        return Err(CodeArenaError::Config(
            format!("JWT secret must be at least {} bytes", MIN_JWT_SECRET_LENGTH)
        ));
    }

    if config.token_ttl_minutes <= 0 {
        return Err(CodeArenaError::Config(
            "Token TTL must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(CodeArenaError::Config(
            "Log level is required".to_string()
        ));
    }
    
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(CodeArenaError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    let valid_formats = ["pretty", "json"];
    if !valid_formats.contains(&config.format.as_str()) {
        return Err(CodeArenaError::Config(
            format!("Invalid log format: {}. Valid formats: {:?}", config.format, valid_formats)
        ));
    }
    
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.auth.jwt_secret = "a".repeat(MIN_JWT_SECRET_LENGTH);
        settings
    }

    #[test]
    fn test_valid_settings_pass() {
        assert!(validate_settings(&valid_settings()).is_ok());
    }

    #[test]
    fn test_default_settings_require_secret() {
        assert_matches!(validate_settings(&Settings::default()), Err(CodeArenaError::Config(msg)) if msg.contains("JWT secret"));
    }

    #[test]
    fn test_short_secret_rejected() {
        let mut settings = valid_settings();
        settings.auth.jwt_secret = "short".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_connection_bounds() {
        let mut settings = valid_settings();
        settings.database.min_connections = 20;
        settings.database.max_connections = 5;
        assert_matches!(validate_settings(&settings), Err(CodeArenaError::Config(_)));
    }

    #[test]
    fn test_logging_values() {
        let mut settings = valid_settings();
        settings.logging.level = "verbose".to_string();
        assert!(validate_settings(&settings).is_err());

        let mut settings = valid_settings();
        settings.logging.format = "xml".to_string();
        assert!(validate_settings(&settings).is_err());
    }
}
