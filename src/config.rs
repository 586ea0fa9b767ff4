use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::env::{self, APP_ENV_ENV, LOG_LEVEL_ENV, LOG_STRINGIFY_ENV};
use crate::error::ConfigError;
use crate::level::Level;

/// Active logger configuration.
///
/// **Fields**
/// - `log_level`: threshold; calls ranked below it are dropped.
/// - `stringify`: if `true`, records are serialized to a single JSON line
///   before they reach the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggerConfig {
    pub log_level: Level,
    pub stringify: bool,
}

impl LoggerConfig {
    /// Defaults for the given deployment environment.
    pub fn for_environment(production: bool) -> Self {
        if production {
            Self { log_level: Level::Info, stringify: true }
        } else {
            Self { log_level: Level::Debug, stringify: false }
        }
    }

    /// Build a configuration from [`APP_ENV_ENV`], then apply the
    /// [`LOG_LEVEL_ENV`] and [`LOG_STRINGIFY_ENV`] overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let production = env::is_production(&env::env_or(APP_ENV_ENV, ""));
        let update = ConfigUpdate::parse(
            env::env_opt(LOG_LEVEL_ENV).as_deref(),
            env::env_opt(LOG_STRINGIFY_ENV).as_deref(),
        )?;
        Ok(Self::for_environment(production).merged(update))
    }

    /// Copy of `self` with the fields present in `update` replaced.
    pub fn merged(mut self, update: ConfigUpdate) -> Self {
        if let Some(level) = update.log_level {
            self.log_level = level;
        }
        if let Some(stringify) = update.stringify {
            self.stringify = stringify;
        }
        self
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::for_environment(false)
    }
}

/// Partial configuration merged into a [`ConfigStore`]. Absent fields
/// leave the stored value untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<Level>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stringify: Option<bool>,
}

impl ConfigUpdate {
    pub fn level(level: Level) -> Self {
        Self { log_level: Some(level), stringify: None }
    }

    pub fn stringify(stringify: bool) -> Self {
        Self { log_level: None, stringify: Some(stringify) }
    }

    /// Validate textual settings, e.g. from environment variables or a
    /// config file.
    pub fn parse(level: Option<&str>, stringify: Option<&str>) -> Result<Self, ConfigError> {
        let log_level = level.map(str::parse::<Level>).transpose()?;
        let stringify = stringify.map(parse_flag).transpose()?;
        Ok(Self { log_level, stringify })
    }
}

fn parse_flag(input: &str) -> Result<bool, ConfigError> {
    match input.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidStringify { input: input.to_string() }),
    }
}

static GLOBAL: Lazy<ConfigStore> = Lazy::new(|| {
    let config = LoggerConfig::from_env().unwrap_or_else(|e| {
        let production = env::is_production(&env::env_or(APP_ENV_ENV, ""));
        let fallback = LoggerConfig::for_environment(production);
        tracing::warn!(error = %e, ?fallback, "invalid logger configuration in environment, using defaults");
        fallback
    });
    ConfigStore::new(config)
});

/// Shared, mutable handle over a [`LoggerConfig`].
///
/// Clones observe the same configuration. Loggers read it on every call,
/// so an update takes effect on the next call and never retroactively.
/// Concurrent writers are last-write-wins.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    inner: Arc<RwLock<LoggerConfig>>,
}

impl ConfigStore {
    pub fn new(config: LoggerConfig) -> Self {
        Self { inner: Arc::new(RwLock::new(config)) }
    }

    /// Process-wide store, initialized from the environment on first use.
    pub fn global() -> ConfigStore {
        GLOBAL.clone()
    }

    /// Snapshot of the current configuration.
    pub fn get(&self) -> LoggerConfig {
        *self.inner.read()
    }

    /// Shallow-merge `update` into the stored configuration.
    pub fn update(&self, update: ConfigUpdate) -> LoggerConfig {
        let mut guard = self.inner.write();
        *guard = guard.merged(update);
        *guard
    }

    pub fn set_level(&self, level: Level) -> LoggerConfig {
        self.update(ConfigUpdate::level(level))
    }

    pub fn set_stringify(&self, stringify: bool) -> LoggerConfig {
        self.update(ConfigUpdate::stringify(stringify))
    }

    /// Replace the whole configuration.
    pub fn replace(&self, config: LoggerConfig) {
        *self.inner.write() = config;
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(LoggerConfig::default())
    }
}
