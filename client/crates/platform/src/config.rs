//! Environment Configuration Helpers
//!
//! Thin readers over process environment variables. Blank values are
//! treated as unset so an empty line in `.env` does not override a default.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Configuration loading errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Variable is set but cannot be parsed
    #[error("{key} has invalid value {value:?}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

/// Read a variable, treating blank values as unset
pub fn env_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a variable or fall back to `default`
pub fn env_or(key: &str, default: &str) -> String {
    env_var(key).unwrap_or_else(|| default.to_string())
}

/// Read and parse an optional variable
pub fn env_parse<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_var(key) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::Invalid {
                key: key.to_string(),
                value,
                reason: e.to_string(),
            }),
    }
}

/// Read a duration given in whole seconds
pub fn env_duration_secs(key: &str) -> Result<Option<Duration>, ConfigError> {
    Ok(env_parse::<u64>(key)?.map(Duration::from_secs))
}
