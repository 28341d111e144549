//! Actions processed by the navigation reducer.

use marquee_core::routing::RoutePath;

/// Everything that can happen to the navigation header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavAction {
    /// The router reported a path change
    RouteChanged {
        /// Path now in effect
        path: RoutePath,
    },

    /// The operator pressed the auth button
    AuthButtonPressed,
}
