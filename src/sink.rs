use crate::error::SinkError;
use crate::level::Level;
use crate::record::Payload;

/// Destination for payloads produced by a [`Logger`](crate::Logger).
///
/// Implementations decide where a payload goes based on its level
/// (stdout vs stderr, a `tracing` level, a database table, etc). The
/// logger calls `send` synchronously on the calling thread.
pub trait LogSink: Send + Sync {
    /// Deliver a single payload.
    ///
    /// **Parameters**
    /// - `level`: level of the call that produced the payload.
    /// - `payload`: the record, or its JSON text when stringify is on.
    ///
    /// **Returns**
    /// - `Ok(())` if the payload was written.
    /// - `Err(..)` if the destination failed. The logger reports the
    ///   failure through `tracing` and drops the payload; there is no
    ///   retry.
    fn send(&self, level: Level, payload: &Payload) -> Result<(), SinkError>;

    /// Flush any buffered output.
    ///
    /// Default implementation is a no-op.
    fn flush(&self) -> Result<(), SinkError> {
        Ok(())
    }
}
