use parking_lot::Mutex;
use std::io::{self, Write};

use crate::error::SinkError;
use crate::level::Level;
use crate::record::Payload;
use crate::sink::LogSink;

/// Output stream selected for a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStream {
    Stdout,
    Stderr,
}

impl ConsoleStream {
    /// `debug` and `info` have their own stdout channel and `warn` and
    /// `error` go to stderr. `fatal` has no channel of its own and falls
    /// back to the error stream.
    pub fn for_level(level: Level) -> Self {
        match level {
            Level::Debug | Level::Info => ConsoleStream::Stdout,
            Level::Warn | Level::Error | Level::Fatal => ConsoleStream::Stderr,
        }
    }
}

/// Writes one line per payload to stdout or stderr.
///
/// Records are written as compact JSON, so the output is the same whether
/// or not stringify is enabled.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    // Serializes writers so lines from concurrent loggers don't interleave.
    lock: Mutex<()>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogSink for ConsoleSink {
    fn send(&self, level: Level, payload: &Payload) -> Result<(), SinkError> {
        let _guard = self.lock.lock();
        match ConsoleStream::for_level(level) {
            ConsoleStream::Stdout => write_line(&mut io::stdout().lock(), payload)?,
            ConsoleStream::Stderr => write_line(&mut io::stderr().lock(), payload)?,
        }
        Ok(())
    }

    fn flush(&self) -> Result<(), SinkError> {
        io::stdout().flush()?;
        io::stderr().flush()?;
        Ok(())
    }
}

fn write_line<W: Write>(out: &mut W, payload: &Payload) -> io::Result<()> {
    writeln!(out, "{}", payload)
}
