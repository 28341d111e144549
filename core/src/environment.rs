//! Dependency injection traits shared across environments.
//!
//! All external dependencies are abstracted behind traits and injected via
//! each component's Environment parameter. The collaborator traits live in
//! their own modules; this one holds the cross-cutting pieces.

use chrono::{DateTime, Utc};

/// Clock trait - abstracts time operations for testability.
///
/// # Examples
///
/// ```
/// use marquee_core::environment::{Clock, SystemClock};
///
/// fn stamp(clock: &dyn Clock) -> String {
///     clock.now().to_rfc3339()
/// }
///
/// let _ = stamp(&SystemClock);
/// ```
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
