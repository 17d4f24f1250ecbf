// Copyright 2026 QM Playground Contributors
// SPDX-License-Identifier: Apache-2.0

//! Configuration management for the playground server.
//!
//! Configuration is loaded from multiple sources with the following priority
//! (later sources override earlier ones):
//!
//! 1. Built-in defaults
//! 2. config.yaml file
//! 3. Environment variables (QMP_*)
//! 4. CLI arguments
//!
//! The resulting [`Config`] is built once before the server starts and is
//! shared read-only with every request handler.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::error::{Error, Result};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Validation settings
    #[serde(default)]
    pub validation: ValidationConfig,
}

impl Config {
    /// Load configuration from file and environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(path) = config_path {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                config = serde_yaml::from_str(&content)?;
            }
        } else {
            for path in &[
                "config.yaml",
                "config.yml",
                "/etc/qm-playground/config.yaml",
            ] {
                let path = Path::new(path);
                if path.exists() {
                    let content = std::fs::read_to_string(path)?;
                    config = serde_yaml::from_str(&content)?;
                    break;
                }
            }
        }

        config.apply_env_overrides();

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("QMP_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = env::var("QMP_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = env::var("QMP_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = env::var("QMP_LOG_FORMAT") {
            self.logging.format = val;
        }
        if let Ok(val) = env::var("QMP_STRICT_VALIDATION") {
            self.validation.strict = val.to_lowercase() == "true" || val == "1";
        }
        if let Ok(val) = env::var("QMP_CORS_ALLOW_ALL") {
            self.server.cors.allow_all = val.to_lowercase() == "true" || val == "1";
        }
        if let Ok(val) = env::var("QMP_CORS_ALLOWED_ORIGINS") {
            self.server.cors.allowed_origins = val
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("HTTP port cannot be 0".into()));
        }
        if !self.server.cors.allow_all {
            if self.server.cors.allowed_origins.is_empty() {
                return Err(Error::Config(
                    "at least one CORS origin is required unless allow_all is set".into(),
                ));
            }
            for origin in &self.server.cors.allowed_origins {
                if !(origin.starts_with("http://") || origin.starts_with("https://")) {
                    return Err(Error::Config(format!(
                        "CORS origin '{}' must start with http:// or https://",
                        origin
                    )));
                }
            }
        }
        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            other => {
                return Err(Error::Config(format!(
                    "unknown log format '{}', expected 'pretty' or 'json'",
                    other
                )))
            }
        }
        if self.server.cors.allow_all {
            tracing::warn!(
                "CORS is set to allow all origins. Set QMP_CORS_ALLOW_ALL=false \
                 or configure specific origins outside local development."
            );
        }
        Ok(())
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP port
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Graceful shutdown timeout in seconds
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_sec: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors: CorsConfig::default(),
            shutdown_timeout_sec: default_shutdown_timeout(),
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allow all origins (development only)
    #[serde(default)]
    pub allow_all: bool,

    /// Allowed origins when allow_all is false
    #[serde(default = "default_cors_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_all: false,
            allowed_origins: default_cors_origins(),
        }
    }
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".into(),
        "http://localhost:5173".into(),
    ]
}

fn default_host() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    8000
}

fn default_shutdown_timeout() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

/// Validation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Enforce resource limits on incoming requests
    #[serde(default = "default_true")]
    pub strict: bool,

    /// Resource limits
    #[serde(default)]
    pub limits: ResourceLimits,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            strict: true,
            limits: ResourceLimits::default(),
        }
    }
}

/// Upper bounds on request sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceLimits {
    /// Maximum spatial grid points
    #[serde(default = "default_max_grid_points")]
    pub max_grid_points: u32,

    /// Maximum number of requested bound states
    #[serde(default = "default_max_levels")]
    pub max_levels: u32,

    /// Maximum number of time samples
    #[serde(default = "default_max_time_steps")]
    pub max_time_steps: u32,

    /// Maximum dimension of user-supplied or generated matrices
    #[serde(default = "default_max_matrix_dim")]
    pub max_matrix_dim: u32,

    /// Maximum length of scalar input arrays
    #[serde(default = "default_max_array_len")]
    pub max_array_len: u32,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_grid_points: default_max_grid_points(),
            max_levels: default_max_levels(),
            max_time_steps: default_max_time_steps(),
            max_matrix_dim: default_max_matrix_dim(),
            max_array_len: default_max_array_len(),
        }
    }
}

fn default_max_grid_points() -> u32 {
    20_000
}

fn default_max_levels() -> u32 {
    200
}

fn default_max_time_steps() -> u32 {
    10_000
}

fn default_max_matrix_dim() -> u32 {
    256
}

fn default_max_array_len() -> u32 {
    100_000
}
