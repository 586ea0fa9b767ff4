use parking_lot::Mutex;
use std::sync::Arc;

use crate::error::SinkError;
use crate::level::Level;
use crate::record::Payload;
use crate::sink::LogSink;

/// A payload captured by [`MemorySink`].
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatched {
    pub level: Level,
    pub payload: Payload,
}

/// Keeps every payload in memory. Clones share the same buffer, so a test
/// can hand one clone to a logger and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<Dispatched>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything captured so far, oldest first.
    pub fn entries(&self) -> Vec<Dispatched> {
        self.entries.lock().clone()
    }

    pub fn last(&self) -> Option<Dispatched> {
        self.entries.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Remove and return everything captured so far.
    pub fn take(&self) -> Vec<Dispatched> {
        std::mem::take(&mut *self.entries.lock())
    }
}

impl LogSink for MemorySink {
    fn send(&self, level: Level, payload: &Payload) -> Result<(), SinkError> {
        self.entries.lock().push(Dispatched {
            level,
            payload: payload.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_buffer() {
        let sink = MemorySink::new();
        let handle = sink.clone();

        sink.send(Level::Info, &Payload::Text("a".into())).unwrap();
        sink.send(Level::Warn, &Payload::Text("b".into())).unwrap();

        assert_eq!(handle.len(), 2);
        assert_eq!(handle.last().unwrap().level, Level::Warn);

        let taken = handle.take();
        assert_eq!(taken.len(), 2);
        assert!(sink.is_empty());
    }
}
