//! Status and notification collaborator boundaries
//!
//! The core never renders anything. Human-readable strings go through a
//! [`Notifier`], and the live-field count goes through a [`StatusSink`];
//! both are implemented by the host. Recording doubles are provided for
//! deterministic tests.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::clock::Tick;

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    /// Informational message
    Info,
    /// Warning message
    Warning,
    /// Error message
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// Receives human-readable status and error strings
///
/// Messages may contain simple markup; rendering is entirely the host's
/// concern.
pub trait Notifier {
    /// Surfaces a message at the given severity
    fn notify(&mut self, severity: Severity, message: &str);
}

/// Receives the count of live fields on every change
///
/// Expected to relay the count externally, e.g. as an icon badge.
pub trait StatusSink {
    /// Reports a changed active-field count
    fn active_count_changed(&mut self, count: usize);
}

/// Derives a display duration for a notification from its word count
///
/// Reading speed is deliberately below the average reader so messages stay
/// up long enough. One tick per millisecond.
pub fn notice_display_ticks(message: &str, words_per_minute: u32) -> Tick {
    let words = message.split_whitespace().count() as u64;
    let wpm = u64::from(words_per_minute.max(1));
    words * 60_000 / wpm
}

/// A recorded notification, for assertions in tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedNotice {
    pub severity: Severity,
    pub message: String,
}

/// Notifier double that records every call
///
/// Clones share the same record, so a probe kept by a test observes calls
/// made through a clone handed into the coordinator.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Rc<RefCell<Vec<RecordedNotice>>>,
}

impl RecordingNotifier {
    /// Creates an empty recording notifier
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all recorded notices in order
    pub fn notices(&self) -> Vec<RecordedNotice> {
        self.notices.borrow().clone()
    }

    /// Returns recorded messages at the given severity
    pub fn messages_at(&self, severity: Severity) -> Vec<String> {
        self.notices
            .borrow()
            .iter()
            .filter(|n| n.severity == severity)
            .map(|n| n.message.clone())
            .collect()
    }

    /// Clears the record
    pub fn clear(&mut self) {
        self.notices.borrow_mut().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, severity: Severity, message: &str) {
        self.notices.borrow_mut().push(RecordedNotice {
            severity,
            message: message.to_string(),
        });
    }
}

/// Status sink double that records every reported count
#[derive(Debug, Clone, Default)]
pub struct RecordingStatus {
    counts: Rc<RefCell<Vec<usize>>>,
}

impl RecordingStatus {
    /// Creates an empty recording status sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every reported count in order
    pub fn reported(&self) -> Vec<usize> {
        self.counts.borrow().clone()
    }

    /// Returns the most recently reported count, if any
    pub fn last(&self) -> Option<usize> {
        self.counts.borrow().last().copied()
    }
}

impl StatusSink for RecordingStatus {
    fn active_count_changed(&mut self, count: usize) {
        self.counts.borrow_mut().push(count);
    }
}
