use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

use crate::message::SharedError;

/// Structured record produced by a single log call.
///
/// Fields keep their construction order, which is also the order of the
/// keys in the serialized JSON. For error inputs the original error stays
/// reachable through [`LogRecord::source_error`]; its `error` field is an
/// object carrying the error's id.
#[derive(Clone, Default)]
pub struct LogRecord {
    fields: Map<String, Value>,
    error: Option<SharedError>,
}

impl LogRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields, error: None }
    }

    pub(crate) fn attach_error(&mut self, error: SharedError, id: &str) {
        let mut summary = Map::new();
        summary.insert("id".to_string(), Value::String(id.to_string()));
        self.fields.insert("error".to_string(), Value::Object(summary));
        self.error = Some(error);
    }

    /// Set `key`, keeping its position if it already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    /// Keys in serialization order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn message(&self) -> Option<&str> {
        self.get_str("message")
    }

    pub fn code(&self) -> Option<&str> {
        self.get_str("code")
    }

    pub fn id(&self) -> Option<&str> {
        self.get_str("id")
    }

    pub fn component(&self) -> Option<&str> {
        self.get_str("component")
    }

    pub fn level(&self) -> Option<&str> {
        self.get_str("level")
    }

    pub fn request(&self) -> Option<&Value> {
        self.fields.get("request")
    }

    /// The error this record was built from, if any.
    pub fn source_error(&self) -> Option<&SharedError> {
        self.error.as_ref()
    }

    /// Single-line JSON rendering.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.fields)
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

impl Serialize for LogRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl fmt::Debug for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.fields.iter()).finish()
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.fields.clone()))
    }
}

impl PartialEq for LogRecord {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

/// What a sink receives: the record itself, or its JSON text when
/// stringify is enabled.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Record(LogRecord),
    Text(String),
}

impl Payload {
    pub fn is_text(&self) -> bool {
        matches!(self, Payload::Text(_))
    }

    pub fn as_record(&self) -> Option<&LogRecord> {
        match self {
            Payload::Record(record) => Some(record),
            Payload::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            Payload::Record(_) => None,
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Record(record) => fmt::Display::fmt(record, f),
            Payload::Text(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_insert_keeps_existing_position() {
        let mut record = LogRecord::new();
        record.insert("level", json!("debug"));
        record.insert("message", json!("hello"));
        record.insert("level", json!("warn"));

        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["level", "message"]);
        assert_eq!(record.level(), Some("warn"));
    }

    #[test]
    fn test_json_preserves_order() {
        let mut record = LogRecord::new();
        record.insert("message", json!("m"));
        record.insert("component", json!("c"));
        record.insert("level", json!("info"));
        assert_eq!(
            record.to_json_string().unwrap(),
            r#"{"message":"m","component":"c","level":"info"}"#
        );
        assert_eq!(record.to_string(), record.to_json_string().unwrap());
    }

    #[test]
    fn test_attach_error_keeps_reference() {
        let err: SharedError = Arc::new(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        let mut record = LogRecord::new();
        record.attach_error(Arc::clone(&err), "e-1");

        assert_eq!(record.get("error"), Some(&json!({"id": "e-1"})));
        assert!(!record.to_json_string().unwrap().contains("Custom"));
        let kept = record.source_error().unwrap();
        assert!(Arc::ptr_eq(kept, &err));
    }

    #[test]
    fn test_payload_accessors() {
        let text = Payload::Text("{}".into());
        assert!(text.is_text());
        assert_eq!(text.as_text(), Some("{}"));
        assert!(text.as_record().is_none());

        let record = Payload::Record(LogRecord::new());
        assert!(!record.is_text());
        assert_eq!(record.to_string(), "{}");
    }
}
