//! Integration tests for the operator session
//!
//! Drives the session store over the scripted auth feed: the initial
//! mirror, pushed transitions, the non-optimistic sign-out flow, and a
//! failing feed.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use marquee_admin::session::{SessionAction, SessionEnvironment, SessionStore};
use marquee_core::auth::{AuthError, AuthStateChange, Credentials, Role, UserId};
use marquee_core::collection::RecordId;
use marquee_core::routing::RoutePath;
use marquee_testing::helpers;
use marquee_testing::{RecordingRouter, StubAuthGateway};
use std::sync::Arc;
use std::time::Duration;

struct Harness {
    gateway: Arc<StubAuthGateway>,
    router: Arc<RecordingRouter>,
    store: SessionStore,
}

fn admin_credentials() -> Credentials {
    Credentials::new(UserId::new("usr-1"), "ops@marquee.dev")
}

fn harness(gateway: StubAuthGateway) -> Harness {
    helpers::init_tracing();
    let gateway = Arc::new(gateway);
    let router = Arc::new(RecordingRouter::new());
    let store = SessionStore::new(SessionEnvironment::new(
        Arc::clone(&gateway) as Arc<dyn marquee_core::auth::AuthGateway>,
        Arc::clone(&router) as Arc<dyn marquee_core::routing::Router>,
        RoutePath::new("/login"),
    ));
    Harness {
        gateway,
        router,
        store,
    }
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

#[tokio::test]
async fn session_mirrors_the_auth_feed() {
    let h = harness(StubAuthGateway::signed_in(admin_credentials(), Role::Admin));
    h.store.start().await.unwrap();
    settle().await;

    let state = h.store.state().await;
    assert!(state.is_login);
    assert_eq!(state.role, Role::Admin);
    assert!(!state.is_loading);

    h.gateway.push_change(AuthStateChange::signed_out());
    settle().await;

    let state = h.store.state().await;
    assert!(!state.is_login);
    assert_eq!(state.role, Role::Guest);
    assert!(state.credentials.is_none());

    h.store.shutdown(Duration::from_secs(1)).await.unwrap();
}

#[tokio::test]
async fn sign_out_clears_the_session_and_lands_on_login() {
    let h = harness(StubAuthGateway::signed_in(admin_credentials(), Role::Admin));
    h.store.start().await.unwrap();
    settle().await;

    let verdict = h
        .store
        .send_and_wait_for(
            SessionAction::SignOutRequested,
            |action| {
                matches!(
                    action,
                    SessionAction::SignOutSucceeded | SessionAction::SignOutFailed { .. }
                )
            },
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert_eq!(verdict, SessionAction::SignOutSucceeded);
    settle().await;

    assert_eq!(h.gateway.sign_out_calls(), 1);

    let state = h.store.state().await;
    assert!(!state.is_login);
    assert_eq!(state.role, Role::Guest);
    assert!(state.credentials.is_none());

    let visited = h.router.visited();
    let paths: Vec<&str> = visited.iter().map(RoutePath::as_str).collect();
    assert_eq!(paths, vec!["/login"]);

    h.store.shutdown(Duration::from_secs(1)).await.unwrap();
}

#[tokio::test]
async fn rejected_sign_out_keeps_the_session() {
    let h = harness(StubAuthGateway::signed_in(admin_credentials(), Role::Admin));
    h.gateway
        .fail_next_sign_out(AuthError::SignOutFailed("gateway 500".to_string()));
    h.store.start().await.unwrap();
    settle().await;

    let verdict = h
        .store
        .send_and_wait_for(
            SessionAction::SignOutRequested,
            |action| {
                matches!(
                    action,
                    SessionAction::SignOutSucceeded | SessionAction::SignOutFailed { .. }
                )
            },
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert!(matches!(verdict, SessionAction::SignOutFailed { .. }));
    settle().await;

    // Still signed in, and nothing navigated.
    let state = h.store.state().await;
    assert!(state.is_login);
    assert_eq!(state.role, Role::Admin);
    assert!(h.router.visited().is_empty());

    h.store.shutdown(Duration::from_secs(1)).await.unwrap();
}

#[tokio::test]
async fn orders_arrive_from_the_host() {
    let h = harness(StubAuthGateway::signed_in(admin_credentials(), Role::User));
    h.store.start().await.unwrap();
    settle().await;

    h.store
        .send(SessionAction::OrdersUpdated {
            orders: vec![RecordId::new("ord-1"), RecordId::new("ord-2")],
        })
        .await
        .unwrap();

    let state = h.store.state().await;
    assert_eq!(
        state.orders,
        vec![RecordId::new("ord-1"), RecordId::new("ord-2")]
    );

    h.store.shutdown(Duration::from_secs(1)).await.unwrap();
}

#[tokio::test]
async fn auth_feed_error_freezes_the_mirror() {
    let h = harness(StubAuthGateway::signed_in(admin_credentials(), Role::Admin));
    h.store.start().await.unwrap();
    settle().await;

    h.gateway
        .push_error(AuthError::ConnectionError("feed dropped".to_string()));
    settle().await;

    // The last mirrored values stay; only the loading flag is resolved.
    let state = h.store.state().await;
    assert!(state.is_login);
    assert_eq!(state.role, Role::Admin);
    assert!(!state.is_loading);

    h.store.shutdown(Duration::from_secs(1)).await.unwrap();
}
