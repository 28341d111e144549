//! Session reducer: mirror auth transitions and run the sign-out flow.

use crate::session::{SessionAction, SessionEnvironment, SessionState};
use marquee_core::auth::Role;
use marquee_core::reducer::Reducer;
use marquee_core::{Effect, SmallVec, async_effect, navigate, sign_out, smallvec};

/// Reducer for [`SessionState`].
///
/// Auth transitions are applied verbatim; the only flow with local logic
/// is sign-out, which clears the session and lands on the sign-in page
/// once the gateway confirms. A rejected sign-out leaves the session
/// untouched and is logged, nothing more.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionReducer;

impl SessionReducer {
    /// Create a session reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for SessionReducer {
    type State = SessionState;
    type Action = SessionAction;
    type Environment = SessionEnvironment;

    fn reduce(
        &self,
        state: &mut SessionState,
        action: SessionAction,
        env: &SessionEnvironment,
    ) -> SmallVec<[Effect<SessionAction>; 4]> {
        match action {
            SessionAction::AuthChanged { change } => {
                state.role = change.role;
                state.is_login = change.is_signed_in();
                state.credentials = change.credentials;
                state.is_loading = false;
                smallvec![]
            }

            SessionAction::AuthFeedFailed { error: _ } => {
                // The consumer already logged the failure. The session keeps
                // its last values; only the initial load resolves.
                state.is_loading = false;
                smallvec![]
            }

            SessionAction::SignOutRequested => {
                smallvec![sign_out! {
                    gateway: env.auth,
                    on_success: || Some(SessionAction::SignOutSucceeded),
                    on_error: |error| Some(SessionAction::SignOutFailed {
                        error: error.to_string(),
                    })
                }]
            }

            SessionAction::SignOutSucceeded => {
                state.role = Role::Guest;
                state.is_login = false;
                state.credentials = None;
                state.orders.clear();
                smallvec![navigate! {
                    router: env.router,
                    to: env.login_path.clone()
                }]
            }

            SessionAction::SignOutFailed { error } => {
                smallvec![async_effect! {
                    tracing::warn!(%error, "sign-out rejected, session unchanged");
                    None
                }]
            }

            SessionAction::OrdersUpdated { orders } => {
                state.orders = orders;
                smallvec![]
            }
        }
    }
}
