use std::str::FromStr;
use std::time::Duration;

use laundry_db::ConnectConfig;

/// Error raised when an environment variable is missing or malformed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Database connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    /// Pool size (default: `10`).
    pub max_connections: u32,
    /// Extra connection attempts at startup (default: `5`).
    pub connect_retries: u32,
    /// Delay before the first retry in seconds (default: `5`).
    pub retry_interval_secs: u64,
}

impl DatabaseConfig {
    /// Settings for [`laundry_db::connect_with_retry`].
    pub fn connect_config(&self) -> ConnectConfig {
        ConnectConfig {
            max_connections: self.max_connections,
            retries: self.connect_retries,
            initial_delay: Duration::from_secs(self.retry_interval_secs),
            ..ConnectConfig::default()
        }
    }
}

/// Limits applied to bookings, slots and schedule reads. `0` disables a limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingRules {
    /// Upcoming bookings a single booker may hold.
    pub max_bookings_per_booker: u32,
    /// Shortest allowed slot, in minutes.
    pub min_slot_duration_minutes: u32,
    /// Longest schedule interval, in days.
    pub max_schedule_days: u32,
}

/// Server configuration loaded from environment variables.
///
/// Everything except `DATABASE_URL` has a default suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3400`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub database: DatabaseConfig,
    pub rules: BookingRules,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                 |
    /// |-----------------------------|-------------------------|
    /// | `HOST`                      | `0.0.0.0`               |
    /// | `PORT`                      | `3400`                  |
    /// | `CORS_ORIGINS`              | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`                    |
    /// | `DATABASE_URL`              | required                |
    /// | `DB_MAX_CONNECTIONS`        | `10`                    |
    /// | `DB_CONNECT_RETRIES`        | `5`                     |
    /// | `DB_RETRY_INTERVAL_SECS`    | `5`                     |
    /// | `MAX_BOOKINGS_PER_BOOKER`   | `0` (unlimited)         |
    /// | `MIN_SLOT_DURATION_MINUTES` | `0` (no minimum)        |
    /// | `MAX_SCHEDULE_DAYS`         | `366`                   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let database = DatabaseConfig {
            url: lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            connect_retries: parse_or(&lookup, "DB_CONNECT_RETRIES", 5)?,
            retry_interval_secs: parse_or(&lookup, "DB_RETRY_INTERVAL_SECS", 5)?,
        };

        let rules = BookingRules {
            max_bookings_per_booker: parse_or(&lookup, "MAX_BOOKINGS_PER_BOOKER", 0)?,
            min_slot_duration_minutes: parse_or(&lookup, "MIN_SLOT_DURATION_MINUTES", 0)?,
            max_schedule_days: parse_or(&lookup, "MAX_SCHEDULE_DAYS", 366)?,
        };

        Ok(Self {
            host,
            port: parse_or(&lookup, "PORT", 3400)?,
            cors_origins,
            request_timeout_secs: parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?,
            database,
            rules,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
