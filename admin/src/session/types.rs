//! Session state mirrored from the authentication feed.

use marquee_core::auth::{Credentials, Role};
use marquee_core::collection::RecordId;

/// Operator session as mirrored from the authentication feed.
///
/// The session is a pure mirror: every field restates what the feed (or
/// the host, for orders) last pushed. Nothing is derived or persisted
/// locally, and a broken feed freezes the fields at their last values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    /// Role of the current session, [`Role::Guest`] when signed out
    pub role: Role,
    /// Whether a session currently exists
    pub is_login: bool,
    /// Credentials of the signed-in operator
    pub credentials: Option<Credentials>,
    /// True until the first auth event resolves the session either way
    pub is_loading: bool,
    /// Order ids the host attached to this session
    pub orders: Vec<RecordId>,
}

impl SessionState {
    /// Session before the first auth event: signed out and loading.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            role: Role::Guest,
            is_login: false,
            credentials: None,
            is_loading: true,
            orders: Vec::new(),
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_is_signed_out_and_loading() {
        let state = SessionState::new();

        assert_eq!(state.role, Role::Guest);
        assert!(!state.is_login);
        assert!(state.credentials.is_none());
        assert!(state.is_loading);
        assert!(state.orders.is_empty());
    }
}
