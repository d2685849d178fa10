//! Configuration module.
//!
//! Loads configuration from environment variables (and `.env`).

use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::invalidation::{ClearSchedule, DEFAULT_CLEAR_SCHEDULE, ScheduleError};
use crate::users::DEFAULT_LATENCY;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    // HTTP
    pub host: String,
    pub port: u16,

    // MongoDB
    pub mongodb_uri: String,
    pub mongodb_database: String,

    // Caching
    /// When the scheduled cache clear fires.
    pub cache_clear_schedule: ClearSchedule,
    /// Whether the scheduled cache clear runs at all.
    pub cache_clear_enabled: bool,
    /// Simulated latency of the static user list.
    pub users_latency: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match var("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value })?,
            None => 8080,
        };

        let cache_clear_enabled = match var("CACHE_CLEAR_ENABLED") {
            Some(value) => parse_bool(&value).ok_or(ConfigError::Invalid {
                key: "CACHE_CLEAR_ENABLED",
                value,
            })?,
            None => true,
        };

        let users_latency = match var("USERS_LATENCY_MS") {
            Some(value) => value
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::Invalid {
                    key: "USERS_LATENCY_MS",
                    value,
                })?,
            None => DEFAULT_LATENCY,
        };

        let schedule = var("CACHE_CLEAR_SCHEDULE").unwrap_or_else(|| DEFAULT_CLEAR_SCHEDULE.to_string());

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            mongodb_uri: var("MONGODB_URI").ok_or(ConfigError::Missing("MONGODB_URI"))?,
            mongodb_database: var("MONGODB_DATABASE").unwrap_or_else(|| "userscache".to_string()),
            cache_clear_schedule: ClearSchedule::parse(&schedule)?,
            cache_clear_enabled,
            users_latency,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("MONGODB_URI", "mongodb://localhost:27017")]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.mongodb_database, "userscache");
        assert_eq!(config.cache_clear_schedule.expression(), DEFAULT_CLEAR_SCHEDULE);
        assert!(config.cache_clear_enabled);
        assert_eq!(config.users_latency, Duration::from_secs(3));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("MONGODB_URI", "mongodb://db:27017"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("MONGODB_DATABASE", "users"),
            ("CACHE_CLEAR_SCHEDULE", "0 0/5 * * * *"),
            ("CACHE_CLEAR_ENABLED", "off"),
            ("USERS_LATENCY_MS", "0"),
        ])
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.mongodb_database, "users");
        assert_eq!(config.cache_clear_schedule.expression(), "0 0/5 * * * *");
        assert!(!config.cache_clear_enabled);
        assert_eq!(config.users_latency, Duration::ZERO);
    }

    #[test]
    fn test_missing_mongodb_uri() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("MONGODB_URI")));
    }

    #[test]
    fn test_invalid_values() {
        let err = load(&[("MONGODB_URI", "mongodb://db"), ("PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));

        let err = load(&[("MONGODB_URI", "mongodb://db"), ("CACHE_CLEAR_ENABLED", "maybe")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "CACHE_CLEAR_ENABLED", .. }));

        let err = load(&[("MONGODB_URI", "mongodb://db"), ("CACHE_CLEAR_SCHEDULE", "hourly")]).unwrap_err();
        assert!(matches!(err, ConfigError::Schedule(_)));
    }
}
