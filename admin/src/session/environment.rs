//! Dependencies injected into the session reducer.

use marquee_core::auth::AuthGateway;
use marquee_core::routing::{RoutePath, Router};
use std::sync::Arc;

/// Collaborators the session reducer reaches through effects.
#[derive(Clone)]
pub struct SessionEnvironment {
    /// Gateway sign-out requests go to
    pub auth: Arc<dyn AuthGateway>,
    /// Router used to land on the sign-in page after sign-out
    pub router: Arc<dyn Router>,
    /// Destination after a completed sign-out
    pub login_path: RoutePath,
}

impl SessionEnvironment {
    /// Bundle the session collaborators.
    #[must_use]
    pub fn new(auth: Arc<dyn AuthGateway>, router: Arc<dyn Router>, login_path: RoutePath) -> Self {
        Self {
            auth,
            router,
            login_path,
        }
    }
}
