//! User-facing notifications for completed or failed operations.
//!
//! The dashboard reports through a `Notifier` it owns instead of a global
//! toast channel, so hosts and tests decide where messages go.

use tracing::{info, warn};

use crate::error::Operation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            title: "Success".to_string(),
            description: description.into(),
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            title: "Error".to_string(),
            description: description.into(),
        }
    }

    /// Confirmation for a completed operation. Reads are silent.
    pub fn completed(operation: Operation) -> Option<Self> {
        let description = match operation {
            Operation::Create => "Meal created successfully!",
            Operation::Update => "Meal updated successfully!",
            Operation::Delete => "Meal deleted successfully!",
            Operation::List | Operation::Search => return None,
        };
        Some(Self::success(description))
    }

    pub fn failed(operation: Operation) -> Self {
        Self::error(match operation {
            Operation::List => "Failed to load meals. Please try again later.",
            Operation::Search => "Failed to search meals. Please try again.",
            Operation::Create => "Failed to create meal. Please try again.",
            Operation::Update => "Failed to update meal. Please try again.",
            Operation::Delete => "Failed to delete meal. Please try again.",
        })
    }
}

pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// Keeps every notification in order.
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    entries: Vec<Notification>,
}

impl NotificationLog {
    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    pub fn last(&self) -> Option<&Notification> {
        self.entries.last()
    }

    /// Hand over everything collected so far.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.entries)
    }
}

impl Notifier for NotificationLog {
    fn notify(&mut self, notification: Notification) {
        self.entries.push(notification);
    }
}

/// Emits notifications as log events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&mut self, notification: Notification) {
        match notification.level {
            Level::Success => info!(title = %notification.title, "{}", notification.description),
            Level::Error => warn!(title = %notification.title, "{}", notification.description),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_have_no_success_message() {
        assert!(Notification::completed(Operation::List).is_none());
        assert!(Notification::completed(Operation::Search).is_none());
        let created = Notification::completed(Operation::Create).unwrap();
        assert_eq!(created.level, Level::Success);
        assert_eq!(created.description, "Meal created successfully!");
    }

    #[test]
    fn failures_carry_retry_hint() {
        let failed = Notification::failed(Operation::Delete);
        assert_eq!(failed.level, Level::Error);
        assert_eq!(failed.title, "Error");
        assert_eq!(failed.description, "Failed to delete meal. Please try again.");
    }

    #[test]
    fn log_drains_in_order() {
        let mut log = NotificationLog::default();
        log.notify(Notification::success("one"));
        log.notify(Notification::error("two"));
        assert_eq!(log.last().unwrap().description, "two");
        let drained = log.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].description, "one");
        assert!(log.entries().is_empty());
    }
}
