//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use blog_infra::database::DatabaseConfig;

use crate::telemetry::TelemetryConfig;

/// Errors raised while reading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Deployment environment (`dev`, `prd`, ...).
    pub env: String,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    /// Shared secret for mutating routes. `None` disables the check.
    pub api_key: Option<String>,
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the configuration from a variable lookup. Empty values count as
    /// unset.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let get_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let database = DatabaseConfig {
            driver: get_or("DB_DRIVER", "sqlite"),
            dsn: get_or("DB_DSN", "sqlite://tmp/app.db?mode=rwc"),
            max_connections: parse_or(get("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", 10)?,
            min_connections: parse_or(get("DB_MIN_CONNECTIONS"), "DB_MIN_CONNECTIONS", 1)?,
            connect_timeout: Duration::from_secs(5),
        };

        Ok(Self {
            env: get_or("APP_ENV", "dev").trim().to_lowercase(),
            host: get_or("HOST", "0.0.0.0"),
            port: parse_or(get("PORT"), "PORT", 8080)?,
            log_level: get_or("LOG_LEVEL", "debug"),
            // Only an unset or empty key disables the guard; the value is compared verbatim.
            api_key: lookup("API_KEY").filter(|v| !v.is_empty()),
            database,
        })
    }

    pub fn is_production(&self) -> bool {
        matches!(self.env.as_str(), "prd" | "prod" | "production")
    }

    pub fn telemetry(&self) -> TelemetryConfig {
        TelemetryConfig {
            json_logs: self.is_production(),
            service_name: "blog-api".to_string(),
            level: self.log_level.clone(),
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    value: Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}
