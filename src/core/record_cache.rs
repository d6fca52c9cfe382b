//! In-memory record cache for diagnostics

use super::log_entry::LogEntry;
use super::log_level::LogLevel;
use parking_lot::Mutex;

/// Append-only list of dispatched records.
///
/// Appends are serialized, so each writer's records keep their order.
#[derive(Debug, Default)]
pub struct RecordCache {
    entries: Mutex<Vec<LogEntry>>,
}

impl RecordCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, level: LogLevel, message: impl Into<String>) {
        self.entries.lock().push(LogEntry::new(level, message));
    }

    /// Copy of the cached records, oldest first
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}
