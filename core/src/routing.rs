//! Router abstraction: current path, path changes, navigation.
//!
//! Marquee treats routing as an external collaborator. Components read the
//! current path, observe changes through a stream, and request navigation;
//! how paths map to screens is the host application's concern.

use futures::Stream;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// A route path such as `/admin/dashboard`.
///
/// Paths are compared **exactly**; there is no prefix or pattern matching
/// here. Active-entry derivation in the navigation header relies on this.
///
/// # Examples
///
/// ```
/// use marquee_core::routing::RoutePath;
///
/// let base = RoutePath::new("/admin/events/update");
/// let full = base.join("evt-42");
/// assert_eq!(full.as_str(), "/admin/events/update/evt-42");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoutePath(String);

impl RoutePath {
    /// Create a path from a string.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Get the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Append one segment, inserting a `/` separator if needed.
    #[must_use]
    pub fn join(&self, segment: &str) -> Self {
        let base = self.0.trim_end_matches('/');
        let segment = segment.trim_start_matches('/');
        Self(format!("{base}/{segment}"))
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RoutePath {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RoutePath {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Type alias for a stream of path changes.
///
/// The stream yields the path in effect after each change. Implementations
/// should yield the current path as the first item so subscribers start from
/// a known position.
pub type RouteStream = Pin<Box<dyn Stream<Item = RoutePath> + Send>>;

/// Router abstraction.
///
/// # Dyn Compatibility
///
/// Explicit `Pin<Box<dyn Future>>` returns keep the trait usable as
/// `Arc<dyn Router>` inside effects.
pub trait Router: Send + Sync {
    /// The path currently in effect.
    fn current(&self) -> RoutePath;

    /// Observe path changes. See [`RouteStream`] for ordering guarantees.
    fn changes(&self) -> Pin<Box<dyn Future<Output = RouteStream> + Send + '_>>;

    /// Navigate to `path`. Fire-and-forget: completion means the request was
    /// handed to the host, not that rendering finished.
    fn navigate(&self, path: RoutePath) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_inserts_single_separator() {
        assert_eq!(
            RoutePath::new("/admin/events/update").join("evt-1").as_str(),
            "/admin/events/update/evt-1"
        );
        assert_eq!(
            RoutePath::new("/admin/events/update/").join("/evt-1").as_str(),
            "/admin/events/update/evt-1"
        );
    }

    #[test]
    fn exact_equality() {
        assert_eq!(RoutePath::new("/about"), RoutePath::from("/about"));
        assert_ne!(RoutePath::new("/about"), RoutePath::new("/about/"));
    }
}
