use crate::error::SinkError;
use crate::level::Level;
use crate::record::Payload;
use crate::sink::LogSink;

/// A sink that simply drops all payloads.
///
/// Useful for measuring the overhead of normalization without any I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl LogSink for NoopSink {
    fn send(&self, _level: Level, _payload: &Payload) -> Result<(), SinkError> {
        Ok(())
    }
}
