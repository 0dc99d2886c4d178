//! Configuration management for the certificate client
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with CERTS_ prefix

use std::path::PathBuf;
use std::time::Duration;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Backend API configuration
    pub api: ApiConfig,

    /// Stored session configuration
    pub session: SessionConfig,

    /// Admin dashboard configuration
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the certificate backend, including any path prefix
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// File holding the admin bearer token between invocations
    pub token_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    /// Number of trailing records shown as recent additions
    pub recent_count: usize,
}

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_RECENT_COUNT: usize = 5;

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("CERTS_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("api.base_url", DEFAULT_API_BASE_URL)?
            .set_default("api.timeout_secs", 30)?
            .set_default(
                "session.token_path",
                default_token_path().to_string_lossy().into_owned(),
            )?
            .set_default("dashboard.recent_count", DEFAULT_RECENT_COUNT as i64)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CERTS_ prefix)
            .add_source(
                Environment::with_prefix("CERTS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

/// `$HOME/.certctl/token`, or `.certctl/token` when no home is set
fn default_token_path() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".certctl")
        .join("token")
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recent_count: DEFAULT_RECENT_COUNT,
        }
    }
}
