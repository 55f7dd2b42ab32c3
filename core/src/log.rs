//! Injected logging capability.
//!
//! The codec and the client report through a `Logger` handed to them by the
//! caller instead of a process-wide logger, so tests can capture what was
//! reported without installing a subscriber.

use std::sync::{Mutex, PoisonError};

/// Sink for the diagnostics the client emits.
pub trait Logger: Send + Sync {
    fn warn(&self, message: &str);
    fn info(&self, message: &str);
}

/// Forwards to the `tracing` macros; what happens next is up to the
/// installed subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Warn,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub level: Level,
    pub message: String,
}

/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    records: Mutex<Vec<Record>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far, oldest first.
    pub fn records(&self) -> Vec<Record> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn count(&self, level: Level) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|r| r.level == level)
            .count()
    }

    fn push(&self, level: Level, message: &str) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Record {
                level,
                message: message.to_string(),
            });
    }
}

impl Logger for RecordingLogger {
    fn warn(&self, message: &str) {
        self.push(Level::Warn, message);
    }

    fn info(&self, message: &str) {
        self.push(Level::Info, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_logger_keeps_order_and_levels() {
        let logger = RecordingLogger::new();
        logger.info("first");
        logger.warn("second");
        logger.info("third");

        let records = logger.records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1], Record { level: Level::Warn, message: "second".to_string() });
        assert_eq!(logger.count(Level::Info), 2);
        assert_eq!(logger.count(Level::Warn), 1);
    }

    #[test]
    fn logger_is_object_safe() {
        let logger: Box<dyn Logger> = Box::new(TracingLogger);
        logger.info("no subscriber installed; this is a no-op");
    }
}
