use std::str::FromStr;
use std::time::Duration;

// ============================================================================
// Configuration - read from environment variables
// ============================================================================
//
//   DATABASE_URL                   required
//   DATABASE_MAX_CONNECTIONS       default 10
//   DATABASE_ACQUIRE_TIMEOUT_SECS  default 30
//   METRICS_PORT                   default 9090
//   RUN_DEMO                       default false
//
// Logging is configured separately through RUST_LOG.
//
// ============================================================================

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {name}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    /// Maximum number of connections in the pool (default: 10)
    pub max_connections: u32,
    /// Timeout for acquiring a connection from the pool (default: 30 seconds)
    pub acquire_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub metrics_port: u16,
    /// Seed a customer and products and place one order at startup
    pub run_demo: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let max_connections: u32 = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                name: "DATABASE_MAX_CONNECTIONS",
                value: "0".to_string(),
            });
        }

        let acquire_timeout_secs: u64 = parse_or(&lookup, "DATABASE_ACQUIRE_TIMEOUT_SECS", 30)?;

        Ok(Self {
            database: DatabaseConfig {
                url,
                max_connections,
                acquire_timeout: Duration::from_secs(acquire_timeout_secs),
            },
            metrics_port: parse_or(&lookup, "METRICS_PORT", 9090)?,
            run_demo: parse_flag(&lookup, "RUN_DEMO")?,
        })
    }
}

fn parse_or<T, F>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

fn parse_flag<F>(lookup: &F, name: &'static str) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(false),
        Some(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" | "" => Ok(false),
            _ => Err(ConfigError::Invalid { name, value }),
        },
    }
}
