//! In-memory activity log for add operations.
//!
//! Entries are never persisted; the log lives as long as the caller keeps it.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A timestamped description of one inventory change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub at: DateTime<Utc>,
    pub message: String,
}

impl LogEntry {
    pub fn new(at: DateTime<Utc>, message: impl Into<String>) -> Self {
        Self {
            at,
            message: message.into(),
        }
    }

    /// Entry recording that `qty` units of `item` were added.
    pub fn added(item: &str, qty: i64, at: DateTime<Utc>) -> Self {
        Self::new(at, format!("Added {qty} of {item}"))
    }
}

impl core::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.at.to_rfc3339_opts(SecondsFormat::Micros, true),
            self.message
        )
    }
}

/// Ordered sequence of log entries supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityLog {
    entries: Vec<LogEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a ActivityLog {
    type Item = &'a LogEntry;
    type IntoIter = core::slice::Iter<'a, LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn added_entry_renders_timestamp_and_message() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let entry = LogEntry::added("apple", 10, at);

        assert_eq!(entry.message, "Added 10 of apple");
        assert_eq!(entry.to_string(), "2024-03-01T12:30:00.000000Z: Added 10 of apple");
    }

    #[test]
    fn log_keeps_insertion_order() {
        let at = Utc::now();
        let mut log = ActivityLog::new();
        log.record(LogEntry::added("apple", 10, at));
        log.record(LogEntry::added("banana", -2, at));

        let messages: Vec<_> = log.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["Added 10 of apple", "Added -2 of banana"]);
        assert_eq!(log.len(), 2);
    }
}
