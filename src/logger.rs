use std::fmt;
use std::sync::Arc;

use crate::config::{ConfigStore, LoggerConfig};
use crate::console_sink::ConsoleSink;
use crate::error_id::ErrorIdTable;
use crate::level::Level;
use crate::message::Message;
use crate::normalize::normalize;
use crate::record::Payload;
use crate::request::RequestLike;
use crate::sink::LogSink;

/// Target of the crate's own diagnostics about dispatching.
pub const DISPATCH_TARGET: &str = "component_log::dispatch";

/// Logger bound to a component name.
///
/// Each call reads the current configuration, drops the call if its level
/// is below the threshold, and otherwise builds a record and hands it to
/// the sink. Calls never fail; sink and serialization failures are
/// reported through `tracing` and the record is dropped.
#[derive(Clone)]
pub struct Logger {
    component: Arc<str>,
    config: ConfigStore,
    sink: Arc<dyn LogSink>,
    error_ids: Arc<ErrorIdTable>,
}

impl Logger {
    /// Logger using the global configuration, the global error-id table
    /// and a [`ConsoleSink`].
    pub fn new(component: impl Into<String>) -> Self {
        Self::builder(component).build()
    }

    pub fn builder(component: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder {
            component: component.into(),
            config: None,
            sink: None,
            error_ids: None,
        }
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    /// Handle to the configuration this logger reads on every call.
    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    pub fn sink(&self) -> &Arc<dyn LogSink> {
        &self.sink
    }

    /// Whether a call at `level` would currently be dispatched.
    pub fn enabled(&self, level: Level) -> bool {
        level.permits(self.config.get().log_level)
    }

    pub fn log(&self, level: Level, message: impl Into<Message>, request: Option<&dyn RequestLike>) {
        let config = self.config.get();
        if !level.permits(config.log_level) {
            return;
        }

        let record = normalize(
            level,
            &self.component,
            message.into(),
            request.map(|r| r.summary()),
            &self.error_ids,
        );

        let payload = if config.stringify {
            match record.to_json_string() {
                Ok(text) => Payload::Text(text),
                Err(e) => {
                    tracing::warn!(
                        target: DISPATCH_TARGET,
                        component = %self.component,
                        error = %e,
                        "failed to serialize log record, dropping it"
                    );
                    return;
                }
            }
        } else {
            Payload::Record(record)
        };

        if let Err(e) = self.sink.send(level, &payload) {
            tracing::warn!(
                target: DISPATCH_TARGET,
                component = %self.component,
                level = %level,
                error = %e,
                "log sink send failed, dropping record"
            );
        }
    }

    pub fn debug(&self, message: impl Into<Message>) {
        self.log(Level::Debug, message, None)
    }

    pub fn info(&self, message: impl Into<Message>) {
        self.log(Level::Info, message, None)
    }

    pub fn warn(&self, message: impl Into<Message>) {
        self.log(Level::Warn, message, None)
    }

    pub fn error(&self, message: impl Into<Message>) {
        self.log(Level::Error, message, None)
    }

    pub fn fatal(&self, message: impl Into<Message>) {
        self.log(Level::Fatal, message, None)
    }

    pub fn debug_with_request<R: RequestLike>(&self, message: impl Into<Message>, request: &R) {
        self.log(Level::Debug, message, Some(request))
    }

    pub fn info_with_request<R: RequestLike>(&self, message: impl Into<Message>, request: &R) {
        self.log(Level::Info, message, Some(request))
    }

    pub fn warn_with_request<R: RequestLike>(&self, message: impl Into<Message>, request: &R) {
        self.log(Level::Warn, message, Some(request))
    }

    pub fn error_with_request<R: RequestLike>(&self, message: impl Into<Message>, request: &R) {
        self.log(Level::Error, message, Some(request))
    }

    pub fn fatal_with_request<R: RequestLike>(&self, message: impl Into<Message>, request: &R) {
        self.log(Level::Fatal, message, Some(request))
    }

    /// Flush the underlying sink.
    pub fn flush(&self) {
        if let Err(e) = self.sink.flush() {
            tracing::warn!(target: DISPATCH_TARGET, component = %self.component, error = %e, "log sink flush failed");
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("component", &self.component)
            .field("config", &self.config.get())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Logger`]. Anything not set falls back to the process-wide
/// defaults used by [`Logger::new`].
pub struct LoggerBuilder {
    component: String,
    config: Option<ConfigStore>,
    sink: Option<Arc<dyn LogSink>>,
    error_ids: Option<Arc<ErrorIdTable>>,
}

impl LoggerBuilder {
    /// Share an existing configuration store.
    pub fn config_store(mut self, store: ConfigStore) -> Self {
        self.config = Some(store);
        self
    }

    /// Use a private store holding `config`.
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = Some(ConfigStore::new(config));
        self
    }

    pub fn sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    pub fn shared_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn error_ids(mut self, table: Arc<ErrorIdTable>) -> Self {
        self.error_ids = Some(table);
        self
    }

    pub fn build(self) -> Logger {
        Logger {
            component: Arc::from(self.component),
            config: self.config.unwrap_or_else(ConfigStore::global),
            sink: self.sink.unwrap_or_else(|| Arc::new(ConsoleSink::new())),
            error_ids: self.error_ids.unwrap_or_else(ErrorIdTable::global),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SinkError;
    use crate::memory_sink::MemorySink;
    use parking_lot::Mutex;
    use std::io;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Everything `tracing` printed while `f` ran.
    fn traced(f: impl FnOnce()) -> String {
        let out = Captured::default();
        let writer = out.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = out.0.lock().clone();
        String::from_utf8(bytes).unwrap()
    }

    struct FailingSink;

    impl LogSink for FailingSink {
        fn send(&self, _level: Level, _payload: &Payload) -> Result<(), SinkError> {
            Err("unreachable backend".into())
        }
    }

    fn logger(sink: &MemorySink, level: Level, stringify: bool) -> Logger {
        Logger::builder("Test component")
            .config(LoggerConfig { log_level: level, stringify })
            .sink(sink.clone())
            .error_ids(Arc::new(ErrorIdTable::new()))
            .build()
    }

    #[test]
    fn test_dispatch_matches_rank_for_all_pairs() {
        for threshold in Level::ALL {
            for call in Level::ALL {
                let sink = MemorySink::new();
                logger(&sink, threshold, false).log(call, "probe", None);
                assert_eq!(
                    sink.len() == 1,
                    call.rank() >= threshold.rank(),
                    "call={} threshold={}",
                    call,
                    threshold
                );
            }
        }
    }

    #[test]
    fn test_enabled_follows_store() {
        let sink = MemorySink::new();
        let logger = logger(&sink, Level::Info, false);
        assert!(!logger.enabled(Level::Debug));
        logger.config().set_level(Level::Debug);
        assert!(logger.enabled(Level::Debug));
    }

    #[test]
    fn test_sink_failure_is_swallowed() {
        let logger = Logger::builder("svc")
            .config(LoggerConfig::default())
            .sink(FailingSink)
            .build();
        logger.error("still fine");
        logger.flush();
    }

    #[test]
    fn test_dropped_call_has_no_side_effects() {
        let sink = MemorySink::new();
        let logger = logger(&sink, Level::Error, false);

        let output = traced(|| logger.info("below threshold"));

        assert!(sink.is_empty());
        assert!(output.is_empty(), "{}", output);
    }

    #[test]
    fn test_sink_failure_is_reported_through_tracing() {
        let logger = Logger::builder("svc")
            .config(LoggerConfig::default())
            .sink(FailingSink)
            .build();

        let output = traced(|| logger.error("lost"));

        assert!(output.contains(DISPATCH_TARGET), "{}", output);
        assert!(output.contains("unreachable backend"), "{}", output);
    }

    #[test]
    fn test_builder_defaults_use_global_state() {
        let logger = Logger::new("svc");
        assert_eq!(logger.component(), "svc");
        assert_eq!(logger.config().get(), ConfigStore::global().get());
    }
}
