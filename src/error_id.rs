use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::error::Error;
use uuid::Uuid;

use crate::message::ErrorInfo;

static GLOBAL: Lazy<Arc<ErrorIdTable>> = Lazy::new(|| Arc::new(ErrorIdTable::new()));

/// Smallest table size at which dropped errors are pruned.
const MIN_PRUNE_AT: usize = 32;

struct Entry {
    error: Weak<dyn Error + Send + Sync + 'static>,
    id: String,
}

/// Side table assigning stable ids to logged errors.
///
/// Errors are keyed by the address of their shared allocation. An entry
/// only matches while the error it was created for is still alive, so a
/// new error reusing a freed address gets a fresh id. Entries of dropped
/// errors are pruned once the table has doubled since the last prune.
#[derive(Default)]
pub struct ErrorIdTable {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<usize, Entry>,
    live_at_last_prune: usize,
}

impl Inner {
    fn prune_at(&self) -> usize {
        (2 * self.live_at_last_prune).max(MIN_PRUNE_AT)
    }

    fn prune(&mut self) {
        self.entries.retain(|_, entry| entry.error.strong_count() > 0);
        self.live_at_last_prune = self.entries.len();
    }
}

impl ErrorIdTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide table shared by loggers that were not given their own.
    pub fn global() -> Arc<ErrorIdTable> {
        Arc::clone(&GLOBAL)
    }

    /// Id to log for `info`: its preset id, the id already assigned to the
    /// same error, or a new UUID v4 which is remembered.
    pub fn id_for(&self, info: &ErrorInfo) -> String {
        if let Some(id) = info.id() {
            return id.to_string();
        }

        let key = info.identity();
        let mut inner = self.inner.lock();
        if let Some(entry) = inner.entries.get(&key) {
            if entry.error.strong_count() > 0 {
                return entry.id.clone();
            }
        }

        if inner.entries.len() >= inner.prune_at() {
            inner.prune();
        }
        let id = Uuid::new_v4().to_string();
        inner.entries.insert(
            key,
            Entry {
                error: Arc::downgrade(info.error()),
                id: id.clone(),
            },
        );
        id
    }

    /// Id previously generated for `info`, if any.
    pub fn assigned(&self, info: &ErrorInfo) -> Option<String> {
        let inner = self.inner.lock();
        inner
            .entries
            .get(&info.identity())
            .filter(|entry| entry.error.strong_count() > 0)
            .map(|entry| entry.id.clone())
    }

    /// Number of tracked errors that are still alive.
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .entries
            .values()
            .filter(|entry| entry.error.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries held, including those of dropped errors not yet pruned.
    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.inner.lock().entries.len()
    }
}
