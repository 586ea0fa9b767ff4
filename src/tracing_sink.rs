use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::error::SinkError;
use crate::level::Level;
use crate::record::Payload;
use crate::sink::LogSink;

/// Target used for events emitted by [`TracingSink`].
pub const RECORD_TARGET: &str = "component_log::record";

/// Forwards payloads to the `tracing` dispatcher as events.
///
/// `fatal` has no `tracing` counterpart and is emitted at `ERROR` with
/// `fatal = true`. The component and the JSON rendering of the record are
/// attached as fields, so any installed subscriber (see
/// [`init_tracing`](crate::init::init_tracing)) decides the final format.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingSink {
    fn send(&self, level: Level, payload: &Payload) -> Result<(), SinkError> {
        let (component, message) = summary_fields(payload);
        let record = payload.to_string();

        match level {
            Level::Debug => debug!(target: RECORD_TARGET, component = %component, record = %record, "{}", message),
            Level::Info => info!(target: RECORD_TARGET, component = %component, record = %record, "{}", message),
            Level::Warn => warn!(target: RECORD_TARGET, component = %component, record = %record, "{}", message),
            Level::Error => error!(target: RECORD_TARGET, component = %component, record = %record, "{}", message),
            Level::Fatal => error!(target: RECORD_TARGET, fatal = true, component = %component, record = %record, "{}", message),
        }
        Ok(())
    }
}

/// `component` and `message` of a payload. Text payloads are parsed back
/// from JSON; text that does not parse yields empty fields.
fn summary_fields(payload: &Payload) -> (String, String) {
    let field = |value: &Value, key: &str| {
        value.get(key).and_then(Value::as_str).unwrap_or_default().to_string()
    };
    match payload {
        Payload::Record(record) => (
            record.component().unwrap_or_default().to_string(),
            record.message().unwrap_or_default().to_string(),
        ),
        Payload::Text(text) => match serde_json::from_str::<Value>(text) {
            Ok(value) => (field(&value, "component"), field(&value, "message")),
            Err(_) => (String::new(), String::new()),
        },
    }
}

/// `tracing` level a record of `level` is emitted at.
pub fn tracing_level(level: Level) -> tracing::Level {
    match level {
        Level::Debug => tracing::Level::DEBUG,
        Level::Info => tracing::Level::INFO,
        Level::Warn => tracing::Level::WARN,
        Level::Error | Level::Fatal => tracing::Level::ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::LogRecord;
    use parking_lot::Mutex;
    use serde_json::json;
    use std::io;
    use std::sync::Arc;

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

    fn capture(level: Level, payload: &Payload) -> String {
        let out = Captured::default();
        let writer = out.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            TracingSink::new().send(level, payload).unwrap();
        });
        let bytes = out.0.lock().clone();
        String::from_utf8(bytes).unwrap()
    }

    fn sample_record() -> LogRecord {
        let mut record = LogRecord::new();
        record.insert("message", json!("hello world"));
        record.insert("component", json!("auth"));
        record.insert("level", json!("info"));
        record
    }

    #[test]
    fn test_text_payload_keeps_message_and_component() {
        let text = sample_record().to_json_string().unwrap();
        let line = capture(Level::Info, &Payload::Text(text));

        assert!(line.contains("hello world component=auth"), "{}", line);
        assert!(line.contains("INFO"), "{}", line);
    }

    #[test]
    fn test_text_and_record_payloads_emit_same_fields() {
        let record = sample_record();
        let text = record.to_json_string().unwrap();

        let from_record = capture(Level::Warn, &Payload::Record(record));
        let from_text = capture(Level::Warn, &Payload::Text(text));

        assert!(from_record.contains("hello world component=auth"), "{}", from_record);
        assert!(from_text.contains("hello world component=auth"), "{}", from_text);
    }

    #[test]
    fn test_unparseable_text_yields_empty_fields() {
        assert_eq!(
            summary_fields(&Payload::Text("not json".into())),
            (String::new(), String::new())
        );
        assert_eq!(
            summary_fields(&Payload::Text(r#"{"component":"svc","message":"up"}"#.into())),
            ("svc".to_string(), "up".to_string())
        );
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(tracing_level(Level::Debug), tracing::Level::DEBUG);
        assert_eq!(tracing_level(Level::Warn), tracing::Level::WARN);
        assert_eq!(tracing_level(Level::Fatal), tracing::Level::ERROR);
    }

    #[test]
    fn test_send_never_fails() {
        let mut record = LogRecord::new();
        record.insert("message", json!("hello"));
        record.insert("component", json!("svc"));

        let sink = TracingSink::new();
        for level in Level::ALL {
            assert!(sink.send(level, &Payload::Record(record.clone())).is_ok());
            assert!(sink.send(level, &Payload::Text("{}".into())).is_ok());
        }
    }
}
