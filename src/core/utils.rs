/// Utility Functions for Configuration and Environment Management
///
/// This module provides helpers for reading server configuration from
/// environment variables. All runtime configuration (transport mode, bind
/// address, worker count, translator pool size) flows through these helpers
/// so defaults live in one place.

/// Identifying client string sent on every outbound HTTP request.
pub const USER_AGENT: &str = "mcp-weather-translate/0.1.0";

/// Get environment variable value with a default fallback.
///
/// Retrieves an environment variable by key, returning the default value if
/// the variable is not set. This is useful for configuration values that
/// may be provided via environment variables (e.g., service URLs, pool sizes).
///
/// # Arguments
/// * `key` - Environment variable name to look up
/// * `default` - Default value to return if the environment variable is not set
pub fn get_env_var(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get an environment variable parsed to a FromStr type.
///
/// Returns the default when the variable is unset or fails to parse. Used for
/// port numbers, worker counts, and the translator pool size.
///
/// # Arguments
/// * `key` - Environment variable name to look up
/// * `default` - Value to return when unset or unparseable
pub fn get_env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse::<T>().ok())
        .unwrap_or(default)
}
