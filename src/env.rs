//! Environment variable names used by this crate to derive the default
//! logger configuration.
//!
//! These are purely helpers; [`ConfigStore`](crate::config::ConfigStore)
//! itself stays decoupled from environment access.

/// Deployment environment name. `production` switches the defaults to
/// `info` and single-line JSON output.
pub const APP_ENV_ENV: &str = "APP_ENV";

/// Optional threshold override, e.g. `warn`.
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// Optional stringify override, `true` or `false`.
pub const LOG_STRINGIFY_ENV: &str = "LOG_STRINGIFY";

/// Value of [`APP_ENV_ENV`] that selects production defaults.
pub const PRODUCTION: &str = "production";

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read an environment variable, treating unset and blank values alike.
pub fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Whether `value` names the production environment.
pub fn is_production(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case(PRODUCTION)
}
