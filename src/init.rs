use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use crate::config::{ConfigStore, LoggerConfig};
use crate::error::InitError;
use crate::tracing_sink::tracing_level;

/// Filter directive matching the threshold of `config`.
///
/// `fatal` maps to `error`, the most severe `tracing` level.
pub fn filter_directive(config: &LoggerConfig) -> String {
    tracing_level(config.log_level).to_string().to_ascii_lowercase()
}

/// Install a global `tracing` subscriber suited to `config`.
///
/// **Behavior**
///
/// The filter comes from `RUST_LOG` when it is set, otherwise from
/// [`filter_directive`]. With `stringify` enabled events are written as
/// JSON lines, otherwise in the human-readable `fmt` format. Pair this
/// with [`TracingSink`](crate::tracing_sink::TracingSink) to route logger
/// records through the subscriber.
///
/// **Returns**
/// - `Err(InitError::AlreadyInstalled)` if a global subscriber exists.
pub fn init_tracing(config: &LoggerConfig) -> Result<(), InitError> {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives)?,
        _ => EnvFilter::try_new(filter_directive(config))?,
    };

    // Two arms because the json and plain fmt layers are distinct types.
    if config.stringify {
        Registry::default()
            .with(filter)
            .with(fmt::layer().json().with_current_span(false))
            .try_init()
            .map_err(|_| InitError::AlreadyInstalled)
    } else {
        Registry::default()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .try_init()
            .map_err(|_| InitError::AlreadyInstalled)
    }
}

/// Install the subscriber using the global [`ConfigStore`].
///
/// Equivalent to calling [`init_tracing`] with the configuration derived
/// from the environment. This is the recommended entrypoint for services.
pub fn init_tracing_from_env() -> Result<(), InitError> {
    init_tracing(&ConfigStore::global().get())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;

    #[test]
    fn test_filter_directive() {
        let mut config = LoggerConfig::default();
        assert_eq!(filter_directive(&config), "debug");
        config.log_level = Level::Warn;
        assert_eq!(filter_directive(&config), "warn");
        config.log_level = Level::Fatal;
        assert_eq!(filter_directive(&config), "error");
    }
}
