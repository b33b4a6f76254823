//! Typed reads of the `APIVIEW_*` environment variables.
//!
//! apiview reads two: `APIVIEW_MAX_ANCESTOR_DEPTH` (parsed, see
//! [`ModelConfig::from_env`](crate::ModelConfig::from_env)) and
//! `APIVIEW_LOG_FORMAT` (a string, read by the CLI's tracing setup).

use std::str::FromStr;

/// Parse an environment variable into a type that implements `FromStr`.
///
/// Returns `None` if the variable is not set or cannot be parsed.
pub fn env_var<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

/// Parse an environment variable, falling back to `default` when it is unset
/// or unparseable.
pub fn env_var_or<T: FromStr>(key: &str, default: T) -> T {
    env_var(key).unwrap_or(default)
}

/// Read an environment variable as a string, or `default` when unset.
pub fn env_string_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
