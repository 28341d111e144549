//! Navigation reducer: track the path in effect and run the auth button.

use crate::nav::{NavAction, NavEnvironment, NavState};
use marquee_core::reducer::Reducer;
use marquee_core::{Effect, SmallVec, async_effect, smallvec};
use std::sync::Arc;

/// Reducer for [`NavState`].
///
/// The auth button decides against the live session at press time: signed
/// in it asks the session to sign out, signed out it navigates to the
/// sign-in page. The session store owns the sign-out flow itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct NavReducer;

impl NavReducer {
    /// Create a navigation reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for NavReducer {
    type State = NavState;
    type Action = NavAction;
    type Environment = NavEnvironment;

    fn reduce(
        &self,
        state: &mut NavState,
        action: NavAction,
        env: &NavEnvironment,
    ) -> SmallVec<[Effect<NavAction>; 4]> {
        match action {
            NavAction::RouteChanged { path } => {
                state.current = path;
                smallvec![]
            }

            NavAction::AuthButtonPressed => {
                let session = env.session.clone();
                let router = Arc::clone(&env.router);
                let login = env.login_path.clone();
                smallvec![async_effect! {
                    if session.is_signed_in().await {
                        session.request_sign_out().await;
                    } else {
                        router.navigate(login).await;
                    }
                    None
                }]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::NavEntry;
    use crate::session::{SessionEnvironment, SessionStore};
    use marquee_core::routing::RoutePath;
    use marquee_testing::reducer_test::assertions::{assert_has_future_effect, assert_no_effects};
    use marquee_testing::{RecordingRouter, ReducerTest, StubAuthGateway};

    fn test_env() -> NavEnvironment {
        let router = Arc::new(RecordingRouter::new());
        let session = SessionStore::new(SessionEnvironment::new(
            Arc::new(StubAuthGateway::new()),
            Arc::clone(&router) as Arc<dyn marquee_core::routing::Router>,
            RoutePath::new("/login"),
        ));
        NavEnvironment::new(session.handle(), router, RoutePath::new("/login"))
    }

    fn state_at(path: &str) -> NavState {
        NavState::new(
            vec![NavEntry::new("Home", RoutePath::new("/"))],
            RoutePath::new(path),
        )
    }

    #[test]
    fn route_change_moves_the_current_path() {
        ReducerTest::new(NavReducer::new())
            .with_env(test_env())
            .given_state(state_at("/"))
            .when_action(NavAction::RouteChanged {
                path: RoutePath::new("/about"),
            })
            .then_state(|state| assert_eq!(state.current, RoutePath::new("/about")))
            .then_effects(|effects| assert_no_effects(effects))
            .run();
    }

    #[test]
    fn auth_button_defers_to_the_live_session() {
        ReducerTest::new(NavReducer::new())
            .with_env(test_env())
            .given_state(state_at("/"))
            .when_action(NavAction::AuthButtonPressed)
            .then_state(|state| assert_eq!(state.current, RoutePath::new("/")))
            .then_effects(|effects| assert_has_future_effect(effects))
            .run();
    }
}
