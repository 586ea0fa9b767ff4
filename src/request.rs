use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shallow projection of a request attached to a record as `request`.
///
/// `id` is always present and `null` when the request has none. The other
/// fields are omitted when the request does not carry them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Value>,
    #[serde(default)]
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Value>,
    #[serde(rename = "httpVersion", default, skip_serializing_if = "Option::is_none")]
    pub http_version: Option<Value>,
}

/// Anything that can be summarized as a [`RequestSummary`].
///
/// Every accessor is optional; a missing field is left out of the summary
/// rather than treated as an error.
pub trait RequestLike {
    fn method(&self) -> Option<Value>;
    fn headers(&self) -> Option<Value>;
    fn id(&self) -> Option<Value>;
    fn url(&self) -> Option<Value>;
    fn http_version(&self) -> Option<Value>;

    fn summary(&self) -> RequestSummary {
        RequestSummary {
            method: self.method(),
            headers: self.headers(),
            id: self.id().filter(is_truthy).unwrap_or(Value::Null),
            url: self.url(),
            http_version: self.http_version(),
        }
    }
}

/// `null`, `false`, `0` and `""` do not count as a request id.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Structural projection of a JSON object's `method`, `headers`, `id`,
/// `url` and `httpVersion` keys. Values are copied as they are.
impl RequestLike for Value {
    fn method(&self) -> Option<Value> {
        self.get("method").cloned()
    }

    fn headers(&self) -> Option<Value> {
        self.get("headers").cloned()
    }

    fn id(&self) -> Option<Value> {
        self.get("id").cloned()
    }

    fn url(&self) -> Option<Value> {
        self.get("url").cloned()
    }

    fn http_version(&self) -> Option<Value> {
        self.get("httpVersion").cloned()
    }
}

impl RequestLike for RequestSummary {
    fn method(&self) -> Option<Value> {
        self.method.clone()
    }

    fn headers(&self) -> Option<Value> {
        self.headers.clone()
    }

    fn id(&self) -> Option<Value> {
        Some(self.id.clone())
    }

    fn url(&self) -> Option<Value> {
        self.url.clone()
    }

    fn http_version(&self) -> Option<Value> {
        self.http_version.clone()
    }
}

#[cfg(feature = "http")]
mod http_request {
    use super::RequestLike;
    use serde_json::{Map, Value};

    /// Header carrying the request id, as set by request-id middleware.
    pub const REQUEST_ID_HEADER: &str = "x-request-id";

    impl<B> RequestLike for http::Request<B> {
        fn method(&self) -> Option<Value> {
            Some(Value::String(self.method().as_str().to_string()))
        }

        /// Header values that are not valid UTF-8 are skipped. Repeated
        /// headers keep the last value.
        fn headers(&self) -> Option<Value> {
            let mut map = Map::new();
            for (name, value) in self.headers() {
                if let Ok(value) = value.to_str() {
                    map.insert(name.as_str().to_string(), Value::String(value.to_string()));
                }
            }
            Some(Value::Object(map))
        }

        fn id(&self) -> Option<Value> {
            self.headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(|v| Value::String(v.to_string()))
        }

        fn url(&self) -> Option<Value> {
            Some(Value::String(self.uri().to_string()))
        }

        fn http_version(&self) -> Option<Value> {
            Some(Value::String(format!("{:?}", self.version())))
        }
    }
}

#[cfg(feature = "http")]
pub use http_request::REQUEST_ID_HEADER;
