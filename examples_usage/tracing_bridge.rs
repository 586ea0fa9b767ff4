use component_log::init::init_tracing;
use component_log::tracing_sink::TracingSink;
use component_log::{ConfigStore, Level, Logger};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let store = ConfigStore::global();
    store.set_level(Level::Info);
    init_tracing(&store.get())?;

    let logger = Logger::builder("auth")
        .config_store(store)
        .sink(TracingSink::new())
        .build();

    logger.info("tracing bridge example started");
    logger.error(json!({"message": "authentication failed", "user_id": 42}));
    Ok(())
}
