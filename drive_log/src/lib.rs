//! # Drive Event Log
//!
//! This crate implements structured logging for the drive namespace core.
//!
//! ## Philosophy
//!
//! Logging is explicit and structured, not text-based or printf-style.
//! Entries carry the drive identity they concern so operators can separate
//! one misbehaving provider from the rest of the session.

use drive_types::DriveId;
use std::sync::{Arc, Mutex};

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Debug information
    Debug,
    /// Informational messages
    Info,
    /// Warnings
    Warn,
    /// Errors
    Error,
}

/// A structured log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Drive this entry concerns (if known)
    pub drive: Option<DriveId>,
    /// Log message
    pub message: String,
    /// Structured fields
    pub fields: Vec<(String, String)>,
}

impl LogEntry {
    /// Creates a new log entry
    pub fn new(level: LogLevel, message: String) -> Self {
        Self {
            level,
            drive: None,
            message,
            fields: Vec::new(),
        }
    }

    /// Sets the drive identity
    pub fn with_drive(mut self, drive: DriveId) -> Self {
        self.drive = Some(drive);
        self
    }

    /// Adds a field to the log entry
    pub fn with_field(mut self, key: String, value: String) -> Self {
        self.fields.push((key, value));
        self
    }
}

/// An in-memory event sink
///
/// Cheap to clone and share: all clones append to the same entry list.
/// The navigator records backend failures here so a listing that fails is
/// visible to an operator even after the host falls back to its default
/// presentation.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl EventLog {
    /// Creates an empty event log
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry
    pub fn record(&self, entry: LogEntry) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry);
        }
    }

    /// Returns a snapshot of all entries
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Removes all entries
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}
