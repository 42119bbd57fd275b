// ABOUTME: Environment-based configuration for the prediction service
// ABOUTME: Reads port, bind address, model path, CORS origins, and deployment environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-only configuration
//!
//! | Variable | Default |
//! |---|---|
//! | `HTTP_PORT` | `8001` |
//! | `HTTP_HOST` | `0.0.0.0` |
//! | `MODEL_PATH` | `models/nutrition_model.json` |
//! | `CORS_ALLOWED_ORIGINS` | `*` |
//! | `ENVIRONMENT` | `development` |

use anyhow::{anyhow, Context, Result};
use nutrition_core::constants::defaults;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tracing::info;

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Allowed CORS origins
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CorsConfig {
    /// Comma-separated origins, or `*`
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: "*".into(),
        }
    }
}

/// Prediction service configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Bind address
    pub http_host: IpAddr,
    /// Model artifact location
    pub model_path: PathBuf,
    /// CORS settings
    pub cors: CorsConfig,
    /// Deployment environment
    pub environment: Environment,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: defaults::HTTP_PORT,
            http_host: IpAddr::from([0, 0, 0, 0]),
            model_path: PathBuf::from(defaults::MODEL_PATH),
            cors: CorsConfig::default(),
            environment: Environment::Development,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `HTTP_PORT` or `HTTP_HOST` cannot be parsed
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            http_port: env_var_or("HTTP_PORT", &defaults::HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
            http_host: env_var_or("HTTP_HOST", defaults::HTTP_HOST)
                .parse()
                .context("Invalid HTTP_HOST value")?,
            model_path: PathBuf::from(env_var_or("MODEL_PATH", defaults::MODEL_PATH)),
            cors: CorsConfig {
                allowed_origins: env_var_or("CORS_ALLOWED_ORIGINS", "*"),
            },
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns an error for a zero port or an empty model path
    pub fn validate(&self) -> Result<()> {
        if self.http_port == 0 {
            return Err(anyhow!("HTTP_PORT must be non-zero"));
        }
        if self.model_path.as_os_str().is_empty() {
            return Err(anyhow!("MODEL_PATH must not be empty"));
        }
        Ok(())
    }

    /// Socket address to bind
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http_host, self.http_port)
    }

    /// Get a summary of the configuration for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Nutrition Coach Server Configuration:\n\
             - Bind Address: {}\n\
             - Model Path: {}\n\
             - CORS Origins: {}\n\
             - Environment: {}",
            self.bind_addr(),
            self.model_path.display(),
            self.cors.allowed_origins,
            self.environment,
        )
    }
}

/// Get environment variable with a default
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str_or_default("PROD"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_or_default("test"),
            Environment::Testing
        );
        assert_eq!(
            Environment::from_str_or_default("staging"),
            Environment::Development
        );
    }

    #[test]
    fn test_summary_lists_bind_address_and_model() {
        let summary = ServerConfig::default().summary();
        assert!(summary.contains("0.0.0.0:8001"));
        assert!(summary.contains("models/nutrition_model.json"));
    }

    #[test]
    fn test_zero_port_is_invalid() {
        let config = ServerConfig {
            http_port: 0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
