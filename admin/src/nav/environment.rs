//! Dependencies injected into the navigation reducer.

use crate::session::SessionHandle;
use marquee_core::routing::{RoutePath, Router};
use std::sync::Arc;

/// Collaborators the navigation reducer reaches through effects.
#[derive(Clone)]
pub struct NavEnvironment {
    /// Live session the auth button decides against
    pub session: SessionHandle,
    /// Router sign-in navigation goes through
    pub router: Arc<dyn Router>,
    /// Sign-in page the button targets while signed out
    pub login_path: RoutePath,
}

impl NavEnvironment {
    /// Bundle the navigation collaborators.
    #[must_use]
    pub fn new(session: SessionHandle, router: Arc<dyn Router>, login_path: RoutePath) -> Self {
        Self {
            session,
            router,
            login_path,
        }
    }
}
