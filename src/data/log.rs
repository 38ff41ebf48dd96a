//! Bounded event log backing the agent log stream panel.

use std::collections::VecDeque;

/// Maximum number of entries the log retains.
pub const LOG_CAPACITY: usize = 8;

/// A single timestamped log line. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Local wall-clock time of day ("HH:MM:SS") at creation.
    pub time: String,
    /// Event text.
    pub message: String,
}

impl LogEntry {
    /// Create an entry stamped with the current local time of day.
    pub fn now(message: impl Into<String>) -> Self {
        Self {
            time: chrono::Local::now().format("%H:%M:%S").to_string(),
            message: message.into(),
        }
    }
}

/// Ordered event log, newest first, bounded at [`LOG_CAPACITY`].
///
/// Inserting into a full buffer silently drops the oldest (tail) entry;
/// the newest is never evicted.
#[derive(Debug, Clone, Default)]
pub struct LogBuffer {
    entries: VecDeque<LogEntry>,
}

impl LogBuffer {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(LOG_CAPACITY),
        }
    }

    /// Prepend a message stamped with the current local time.
    pub fn push(&mut self, message: impl Into<String>) {
        self.push_entry(LogEntry::now(message));
    }

    /// Prepend an already-built entry, evicting beyond capacity.
    pub fn push_entry(&mut self, entry: LogEntry) {
        self.entries.push_front(entry);
        while self.entries.len() > LOG_CAPACITY {
            self.entries.pop_back();
        }
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
