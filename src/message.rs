use serde_json::{Map, Value};
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Shared handle to a caller's error.
pub type SharedError = Arc<dyn Error + Send + Sync + 'static>;

/// Input accepted by the level methods of a [`Logger`](crate::Logger).
///
/// The variant decides which normalization rule applies; see
/// [`normalize`](crate::normalize::normalize).
#[derive(Debug, Clone)]
pub enum Message {
    /// Plain text, logged as `{message: ...}`.
    Text(String),
    /// An error, logged with `code`, `message`, `error` and `id`.
    Error(ErrorInfo),
    /// Already-structured fields used as the base record.
    Fields(Map<String, Value>),
}

impl From<&str> for Message {
    fn from(s: &str) -> Self {
        Message::Text(s.to_string())
    }
}

impl From<String> for Message {
    fn from(s: String) -> Self {
        Message::Text(s)
    }
}

impl From<&String> for Message {
    fn from(s: &String) -> Self {
        Message::Text(s.clone())
    }
}

impl From<Map<String, Value>> for Message {
    fn from(fields: Map<String, Value>) -> Self {
        Message::Fields(fields)
    }
}

/// Strings become [`Message::Text`], objects [`Message::Fields`]. Any
/// other JSON value is logged as text holding its JSON rendering.
impl From<Value> for Message {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Message::Text(s),
            Value::Object(fields) => Message::Fields(fields),
            other => Message::Text(other.to_string()),
        }
    }
}

impl From<ErrorInfo> for Message {
    fn from(info: ErrorInfo) -> Self {
        Message::Error(info)
    }
}

impl From<&ErrorInfo> for Message {
    fn from(info: &ErrorInfo) -> Self {
        Message::Error(info.clone())
    }
}

/// A caller's error together with the name and id used when logging it.
///
/// Cloning an `ErrorInfo` keeps the identity of the wrapped error, so a
/// clone logged later receives the same generated id as the original.
#[derive(Clone)]
pub struct ErrorInfo {
    error: SharedError,
    name: String,
    id: Option<String>,
}

impl ErrorInfo {
    /// Wrap `error`, naming it after its type (`std::io::Error` is named
    /// `"Error"`).
    pub fn new<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            name: short_type_name::<E>().to_string(),
            error: Arc::new(error),
            id: None,
        }
    }

    /// Wrap an error that is already shared.
    pub fn shared(name: impl Into<String>, error: SharedError) -> Self {
        Self { error, name: name.into(), id: None }
    }

    /// Override the name logged as `code`.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Preset the id. A preset id is logged unchanged.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display text of the wrapped error.
    pub fn message(&self) -> String {
        self.error.to_string()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn error(&self) -> &SharedError {
        &self.error
    }

    /// Address of the wrapped error's allocation; equal for clones.
    pub(crate) fn identity(&self) -> usize {
        Arc::as_ptr(&self.error) as *const () as usize
    }
}

impl fmt::Debug for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorInfo")
            .field("name", &self.name)
            .field("error", &self.error)
            .field("id", &self.id)
            .finish()
    }
}

impl<E> From<E> for ErrorInfo
where
    E: Error + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        ErrorInfo::new(error)
    }
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
