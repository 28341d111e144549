//! Operator notifications.
//!
//! Notices are fire-and-forget: the engine reports outcomes (a delete
//! succeeded, a subscription broke) and moves on. Presentation is the
//! notifier's business.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// How loud the notice should be.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// An operation completed as requested
    Success,
    /// Something needs attention but nothing failed
    Warning,
    /// An operation failed
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// One notice shown to the operator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity of the notice
    pub severity: Severity,
    /// Short headline
    pub title: String,
    /// Body text
    pub message: String,
}

impl Notice {
    /// Create a notice.
    #[must_use]
    pub fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Create a success notice.
    #[must_use]
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Success, title, message)
    }

    /// Create an error notice.
    #[must_use]
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, title, message)
    }
}

/// Delivers notices to the operator.
///
/// # Dyn Compatibility
///
/// Explicit `Pin<Box<dyn Future>>` returns keep the trait usable as
/// `Arc<dyn Notifier>` inside effects.
pub trait Notifier: Send + Sync {
    /// Deliver `notice`. Completion means the notice was handed to the
    /// presentation layer, nothing more.
    fn notify(&self, notice: Notice) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_display() {
        assert_eq!(format!("{}", Severity::Success), "success");
        assert_eq!(format!("{}", Severity::Error), "error");
    }

    #[test]
    fn notice_constructors() {
        let notice = Notice::success("Event Deleted", "Jazz Night deleted successfully");
        assert_eq!(notice.severity, Severity::Success);
        assert_eq!(notice.title, "Event Deleted");

        let notice = Notice::error("Error", "boom");
        assert_eq!(notice.severity, Severity::Error);
    }
}
