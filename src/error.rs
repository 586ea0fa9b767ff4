/// Error type returned when parsing or validating logger configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown log level '{input}', expected one of debug, info, warn, error, fatal")]
    UnknownLevel { input: String },

    #[error("invalid stringify flag '{input}', expected true or false")]
    InvalidStringify { input: String },
}

/// Error type returned when installing the global `tracing` subscriber.
#[derive(thiserror::Error, Debug)]
pub enum InitError {
    #[error("invalid tracing filter directive: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled,
}

/// Boxed error returned by [`LogSink`](crate::sink::LogSink) implementations.
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;
