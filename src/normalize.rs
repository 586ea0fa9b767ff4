use serde_json::{Map, Value};

use crate::error_id::ErrorIdTable;
use crate::level::Level;
use crate::message::Message;
use crate::record::LogRecord;
use crate::request::RequestSummary;

/// Build the canonical record for one log call.
///
/// Text becomes `{message}`; an error becomes `{code, message, error, id}`
/// with the id resolved through `error_ids`; structured fields are used as
/// they are. `request`, `component` and `level` are then set in that
/// order, overwriting any keys of the same name already present.
pub fn normalize(
    level: Level,
    component: &str,
    message: Message,
    request: Option<RequestSummary>,
    error_ids: &ErrorIdTable,
) -> LogRecord {
    let mut record = match message {
        Message::Text(text) => {
            let mut fields = Map::new();
            fields.insert("message".to_string(), Value::String(text));
            LogRecord::from_fields(fields)
        }
        Message::Error(info) => {
            let id = error_ids.id_for(&info);
            let mut record = LogRecord::new();
            record.insert("code", Value::String(info.name().to_string()));
            record.insert("message", Value::String(info.message()));
            record.attach_error(info.error().clone(), &id);
            record.insert("id", Value::String(id));
            record
        }
        Message::Fields(fields) => LogRecord::from_fields(fields),
    };

    if let Some(request) = request {
        record.insert("request", request_value(request));
    }
    record.insert("component", Value::String(component.to_string()));
    record.insert("level", Value::String(level.as_str().to_string()));
    record
}

fn request_value(request: RequestSummary) -> Value {
    // RequestSummary holds only JSON values, so this cannot fail.
    serde_json::to_value(request).unwrap_or(Value::Null)
}
