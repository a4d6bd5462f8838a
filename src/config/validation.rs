//! Configuration validation module
//! 
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{EventDeskError, Result};
use super::Settings;

/// Minimum length accepted for the token signing secret
pub const MIN_JWT_SECRET_LEN: usize = 16;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_auth_config(&settings.auth)?;
    validate_google_config(&settings.google)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.port == 0 {
        return Err(EventDeskError::Config(
            "Server port must be greater than 0".to_string()
        ));
    }

    if !config.api_prefix.is_empty() && !config.api_prefix.starts_with('/') {
        return Err(EventDeskError::Config(
            format!("API prefix must start with '/': {}", config.api_prefix)
        ));
    }

    if config.request_timeout_secs == 0 {
        return Err(EventDeskError::Config(
            "Request timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(EventDeskError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(EventDeskError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(EventDeskError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate bearer token configuration
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if config.jwt_secret.is_empty() {
        return Err(EventDeskError::Config(
            "JWT secret is required".to_string()
        ));
    }

    if config.jwt_secret.len() < MIN_JWT_SECRET_LEN {
        return Err(EventDeskError::Config(
            format!("JWT secret must be at least {} characters", MIN_JWT_SECRET_LEN)
        ));
    }

    if config.token_ttl_seconds <= 0 {
        return Err(EventDeskError::Config(
            "Token lifetime must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate Google OAuth configuration
fn validate_google_config(config: &super::GoogleConfig) -> Result<()> {
    if config.client_id.is_empty() {
        return Err(EventDeskError::Config(
            "Google client ID is required".to_string()
        ));
    }

    if config.client_secret.is_empty() {
        return Err(EventDeskError::Config(
            "Google client secret is required".to_string()
        ));
    }

    for (name, value) in [
        ("redirect URL", &config.redirect_url),
        ("authorization URL", &config.auth_url),
        ("token URL", &config.token_url),
        ("userinfo URL", &config.userinfo_url),
    ] {
        url::Url::parse(value).map_err(|e| {
            EventDeskError::Config(format!("Invalid Google {}: {}", name, e))
        })?;
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(EventDeskError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(EventDeskError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
