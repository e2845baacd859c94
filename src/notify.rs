//! User-facing notifications.
//!
//! Network failures surface here as fire-and-forget messages. The sink is
//! injected wherever it is needed; nothing looks it up lazily.

use parking_lot::Mutex;
use std::collections::VecDeque;

/// How urgent a notification is. The dashboard only ever raises errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
}

/// A single message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

/// Sink accepting notifications. Implementations must tolerate being called
/// from any thread, including tokio workers.
pub trait Notify: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Bounded in-memory sink backing the footer widget.
///
/// Keeps the most recent `capacity` notifications; older entries are dropped.
/// The retained history is what makes the interception layer testable.
pub struct NotificationBuffer {
    entries: Mutex<VecDeque<Notification>>,
    capacity: usize,
}

impl NotificationBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    /// Most recent notification, if any.
    pub fn latest(&self) -> Option<Notification> {
        self.entries.lock().back().cloned()
    }

    /// All retained notifications, oldest first.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.entries.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Notify for NotificationBuffer {
    fn notify(&self, notification: Notification) {
        let mut entries = self.entries.lock();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(notification);
    }
}
