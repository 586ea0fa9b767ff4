use component_log::env::{APP_ENV_ENV, LOG_LEVEL_ENV, LOG_STRINGIFY_ENV};
use component_log::{ConfigError, ConfigStore, ConfigUpdate, Level, Logger, LoggerConfig, MemorySink};

// Environment and the global store are process-wide, so everything that
// touches them runs in this single test.
#[test]
fn test_environment_and_global_store() {
    std::env::set_var(APP_ENV_ENV, "production");
    std::env::remove_var(LOG_LEVEL_ENV);
    std::env::remove_var(LOG_STRINGIFY_ENV);
    assert_eq!(
        LoggerConfig::from_env().unwrap(),
        LoggerConfig { log_level: Level::Info, stringify: true }
    );

    std::env::set_var(APP_ENV_ENV, "development");
    assert_eq!(
        LoggerConfig::from_env().unwrap(),
        LoggerConfig { log_level: Level::Debug, stringify: false }
    );

    std::env::set_var(LOG_LEVEL_ENV, "error");
    std::env::set_var(LOG_STRINGIFY_ENV, "true");
    assert_eq!(
        LoggerConfig::from_env().unwrap(),
        LoggerConfig { log_level: Level::Error, stringify: true }
    );

    std::env::set_var(LOG_LEVEL_ENV, "chatty");
    assert_eq!(
        LoggerConfig::from_env().unwrap_err(),
        ConfigError::UnknownLevel { input: "chatty".to_string() }
    );
    std::env::remove_var(LOG_LEVEL_ENV);
    std::env::remove_var(LOG_STRINGIFY_ENV);

    let sink = MemorySink::new();
    let logger = Logger::builder("Test component").sink(sink.clone()).build();

    let global = ConfigStore::global();
    global.replace(LoggerConfig { log_level: Level::Info, stringify: false });
    logger.info("visible");

    global.update(ConfigUpdate::level(Level::Warn));
    assert!(!global.get().stringify);
    logger.info("hidden");
    logger.error("also visible");

    let messages: Vec<String> = sink
        .entries()
        .iter()
        .map(|d| d.payload.as_record().unwrap().message().unwrap().to_string())
        .collect();
    assert_eq!(messages, vec!["visible", "also visible"]);
}
