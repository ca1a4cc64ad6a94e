//! Application settings management
//! 
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub logging: LoggingConfig,
    pub enrollment: EnrollmentSettings,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Empty list allows any origin
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
}

/// Bearer token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub issuer: String,
    pub token_ttl_minutes: i64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the daily rolling log file; stdout only when empty
    pub file_path: String,
    /// `pretty` or `json`
    pub format: String,
}

/// Enrollment behaviour
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnrollmentSettings {
    /// Put participants on the waitlist instead of rejecting them when an event is full
    pub waitlist_enabled: bool,
}

impl Settings {
    /// Load settings from defaults, an optional `config` file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::load(config::File::with_name("config").required(false))
    }

    /// Load settings from defaults overlaid with the given file source and environment
    pub fn load<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("CODEARENA")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::CodeArenaError> {
        super::validation::validate_settings(self)
    }

    /// Socket address string the server binds to
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 8080,
                cors_origins: vec!["http://localhost:3000".to_string()],
            },
            database: DatabaseSettings {
                url: "postgresql://localhost/codearena".to_string(),
                max_connections: 10,
                min_connections: 1,
                acquire_timeout_seconds: 30,
            },
            auth: AuthSettings {
                jwt_secret: String::new(),
                issuer: "codearena".to_string(),
                token_ttl_minutes: 60,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "logs".to_string(),
                format: "pretty".to_string(),
            },
            enrollment: EnrollmentSettings {
                waitlist_enabled: true,
            },
        }
    }
}
