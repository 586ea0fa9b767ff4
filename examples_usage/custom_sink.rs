use component_log::{Level, LogSink, Logger, LoggerConfig, Payload, SinkError};

/// Example of integrating a custom destination by implementing the
/// `LogSink` trait directly. Imagine this talks to some proprietary
/// store; here it just prefixes each line.
struct PrefixSink {
    prefix: &'static str,
}

impl LogSink for PrefixSink {
    fn send(&self, level: Level, payload: &Payload) -> Result<(), SinkError> {
        println!("[{}:{}] {}", self.prefix, level, payload);
        Ok(())
    }
}

fn main() {
    let logger = Logger::builder("inventory")
        .config(LoggerConfig { log_level: Level::Info, stringify: true })
        .sink(PrefixSink { prefix: "my-store" })
        .build();

    logger.debug("not shown");
    logger.info("custom sink example started");

    logger.config().set_level(Level::Error);
    logger.warn("not shown either");
    logger.error("stock level negative");
}
