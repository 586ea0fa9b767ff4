//! Component-scoped structured logging.
//!
//! A [`Logger`] is bound to a component name. Its level methods accept
//! text, errors ([`ErrorInfo`]) or structured JSON fields, optionally with
//! a request, and turn each call into one [`LogRecord`]:
//!
//! ```
//! use component_log::{Level, Logger, LoggerConfig, MemorySink};
//!
//! let sink = MemorySink::new();
//! let logger = Logger::builder("billing")
//!     .config(LoggerConfig { log_level: Level::Info, stringify: false })
//!     .sink(sink.clone())
//!     .build();
//!
//! logger.debug("dropped below threshold");
//! logger.info("invoice created");
//!
//! let record = sink.last().unwrap().payload;
//! let record = record.as_record().unwrap();
//! assert_eq!(record.message(), Some("invoice created"));
//! assert_eq!(record.component(), Some("billing"));
//! assert_eq!(sink.len(), 1);
//! ```

pub mod config;
pub mod env;
pub mod error;
pub mod error_id;
pub mod level;
pub mod logger;
pub mod message;
pub mod normalize;
pub mod record;
pub mod request;
pub mod sink;

pub mod console_sink;
pub mod memory_sink;
pub mod noop_sink;
pub mod tracing_sink;

pub mod init;

pub use config::{ConfigStore, ConfigUpdate, LoggerConfig};
pub use error::{ConfigError, InitError, SinkError};
pub use error_id::ErrorIdTable;
pub use level::Level;
pub use logger::{Logger, LoggerBuilder};
pub use memory_sink::{Dispatched, MemorySink};
pub use message::{ErrorInfo, Message};
pub use record::{LogRecord, Payload};
pub use request::{RequestLike, RequestSummary};
pub use sink::LogSink;
