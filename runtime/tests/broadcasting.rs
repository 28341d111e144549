//! Integration tests for Store action broadcasting
//!
//! Tests the action observation features that let consumer loops and
//! request-response waits follow a pipeline (for example a removal flow)
//! to its terminal action.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic
#![allow(clippy::needless_continue, clippy::match_same_arms)] // Test code - allow pedantic warnings

use marquee_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
use marquee_runtime::{Store, StoreError};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

// ============================================================================
// Test Fixtures
// ============================================================================

/// A two-stage removal pipeline: a request is verified, then completed.
/// Mirrors the shape of the admin delete flow without its collaborators.
#[derive(Debug, Clone, PartialEq)]
enum PipelineAction {
    RemovalRequested { id: u32 },
    RemovalVerified { id: u32 },
    RemovalCompleted { id: u32 },
    /// Never produced by the reducer; used to exercise timeouts
    RemovalAborted { id: u32 },
    Refresh,
    Refreshed { generation: u32 },
}

#[derive(Debug, Clone, Default)]
struct PipelineState {
    generation: u32,
    completed: Vec<u32>,
}

#[derive(Clone)]
struct PipelineEnv;

#[derive(Clone)]
struct PipelineReducer;

impl Reducer for PipelineReducer {
    type State = PipelineState;
    type Action = PipelineAction;
    type Environment = PipelineEnv;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            PipelineAction::RemovalRequested { id } => {
                smallvec![Effect::Future(Box::pin(async move {
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    Some(PipelineAction::RemovalVerified { id })
                }))]
            },

            PipelineAction::RemovalVerified { id } => {
                smallvec![Effect::Future(Box::pin(async move {
                    Some(PipelineAction::RemovalCompleted { id })
                }))]
            },

            PipelineAction::RemovalCompleted { id } => {
                state.completed.push(id);
                smallvec![Effect::None]
            },

            PipelineAction::RemovalAborted { .. } => smallvec![Effect::None],

            PipelineAction::Refresh => {
                state.generation += 1;
                let generation = state.generation;
                smallvec![Effect::Future(Box::pin(async move {
                    Some(PipelineAction::Refreshed { generation })
                }))]
            },

            PipelineAction::Refreshed { .. } => smallvec![Effect::None],
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

/// `send_and_wait_for` resolves as soon as the matching action is produced.
#[tokio::test]
async fn test_wait_for_resolves_on_terminal_action() {
    let store = Store::new(PipelineState::default(), PipelineReducer, PipelineEnv);

    let result = store
        .send_and_wait_for(
            PipelineAction::Refresh,
            |action| matches!(action, PipelineAction::Refreshed { .. }),
            Duration::from_secs(1),
        )
        .await;

    assert!(result.is_ok());
    assert_eq!(
        result.unwrap(),
        PipelineAction::Refreshed { generation: 1 }
    );
}

/// `send_and_wait_for` follows a multi-step pipeline to its terminal action.
#[tokio::test]
async fn test_wait_for_follows_multi_step_pipeline() {
    let store = Store::new(PipelineState::default(), PipelineReducer, PipelineEnv);

    let result = store
        .send_and_wait_for(
            PipelineAction::RemovalRequested { id: 7 },
            |action| matches!(action, PipelineAction::RemovalCompleted { id: 7 }),
            Duration::from_secs(1),
        )
        .await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap(), PipelineAction::RemovalCompleted { id: 7 });

    let completed = store.state(|s| s.completed.clone()).await;
    assert_eq!(completed, vec![7]);
}

/// `send_and_wait_for` returns `Timeout` when the terminal never arrives.
#[tokio::test]
async fn test_wait_for_times_out_without_terminal() {
    let store = Store::new(PipelineState::default(), PipelineReducer, PipelineEnv);

    let result = store
        .send_and_wait_for(
            PipelineAction::RemovalRequested { id: 9 },
            |action| matches!(action, PipelineAction::RemovalAborted { id: 9 }),
            Duration::from_millis(50),
        )
        .await;

    assert!(matches!(result, Err(StoreError::Timeout)));
}

/// Concurrent waiters each resolve on the action carrying their own id.
#[tokio::test]
async fn test_waiters_match_their_own_record() {
    let store = Store::new(PipelineState::default(), PipelineReducer, PipelineEnv);

    let (first, second) = futures::future::join(
        store.send_and_wait_for(
            PipelineAction::RemovalRequested { id: 1 },
            |action| matches!(action, PipelineAction::RemovalCompleted { id: 1 }),
            Duration::from_secs(2),
        ),
        store.send_and_wait_for(
            PipelineAction::RemovalRequested { id: 2 },
            |action| matches!(action, PipelineAction::RemovalCompleted { id: 2 }),
            Duration::from_secs(2),
        ),
    )
    .await;

    assert_eq!(first.unwrap(), PipelineAction::RemovalCompleted { id: 1 });
    assert_eq!(second.unwrap(), PipelineAction::RemovalCompleted { id: 2 });

    let completed = store.state(|s| s.completed.clone()).await;
    assert_eq!(completed.len(), 2);
}

/// Observers see each stage of a pipeline in the order effects produced them.
#[tokio::test]
async fn test_observers_see_each_pipeline_stage() {
    let store = Arc::new(Store::new(
        PipelineState::default(),
        PipelineReducer,
        PipelineEnv,
    ));

    let mut rx = store.subscribe_actions();

    let received = Arc::new(Mutex::new(Vec::new()));
    let received_clone = Arc::clone(&received);

    tokio::spawn(async move {
        let mut count = 0;
        while count < 2 {
            // Expect RemovalVerified then RemovalCompleted
            if let Ok(action) = rx.recv().await {
                received_clone.lock().await.push(action);
                count += 1;
            }
        }
    });

    // Give the observer time to set up
    tokio::time::sleep(Duration::from_millis(10)).await;

    store
        .send(PipelineAction::RemovalRequested { id: 3 })
        .await
        .ok();

    tokio::time::sleep(Duration::from_millis(100)).await;

    let actions = received.lock().await;
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[0], PipelineAction::RemovalVerified { id: 3 });
    assert_eq!(actions[1], PipelineAction::RemovalCompleted { id: 3 });
}

/// Only effect-produced actions are broadcast, never the action passed
/// to `send` itself.
#[tokio::test]
async fn test_sent_action_is_not_broadcast() {
    let store = Store::new(PipelineState::default(), PipelineReducer, PipelineEnv);

    let mut rx = store.subscribe_actions();

    store.send(PipelineAction::Refresh).await.ok();

    tokio::time::sleep(Duration::from_millis(50)).await;

    let actions: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok()).collect();

    assert_eq!(actions.len(), 1);
    assert!(matches!(actions[0], PipelineAction::Refreshed { .. }));
}

/// Actions fed back by `Effect::Delay` reach observers too.
#[tokio::test]
async fn test_delayed_actions_are_broadcast() {
    #[derive(Debug, Clone, PartialEq)]
    enum BannerAction {
        Shown,
        Expired,
    }

    #[derive(Clone, Default)]
    struct BannerState;

    #[derive(Clone)]
    struct BannerReducer;

    impl Reducer for BannerReducer {
        type State = BannerState;
        type Action = BannerAction;
        type Environment = PipelineEnv;

        fn reduce(
            &self,
            _state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                BannerAction::Shown => smallvec![Effect::Delay {
                    duration: Duration::from_millis(10),
                    action: Box::new(BannerAction::Expired),
                }],
                BannerAction::Expired => smallvec![Effect::None],
            }
        }
    }

    let store = Store::new(BannerState, BannerReducer, PipelineEnv);
    let mut rx = store.subscribe_actions();

    store.send(BannerAction::Shown).await.ok();

    let action = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("Timeout waiting for delayed action")
        .expect("Channel closed");

    assert_eq!(action, BannerAction::Expired);
}

/// A slow observer skips old actions but keeps receiving new ones.
#[tokio::test]
async fn test_lagged_observer_skips_but_recovers() {
    let store = Store::with_broadcast_capacity(
        PipelineState::default(),
        PipelineReducer,
        PipelineEnv,
        2, // Small capacity to force lagging
    );

    let mut rx = store.subscribe_actions();

    for _ in 0..12 {
        store.send(PipelineAction::Refresh).await.ok();
    }

    tokio::time::sleep(Duration::from_millis(100)).await;

    let mut received = 0;
    let mut lagged = false;

    loop {
        match rx.try_recv() {
            Ok(_) => received += 1,
            Err(tokio::sync::broadcast::error::TryRecvError::Lagged(_)) => {
                lagged = true;
                continue;
            },
            Err(_) => break,
        }
    }

    assert!(
        lagged || received < 12,
        "Expected the observer to lag or miss actions with capacity 2"
    );
    assert!(received > 0, "Should still receive recent actions");
}

/// Each observer has an independent cursor into the action stream.
#[tokio::test]
async fn test_observers_receive_independently() {
    let store = Store::new(PipelineState::default(), PipelineReducer, PipelineEnv);

    let mut rx1 = store.subscribe_actions();
    let mut rx2 = store.subscribe_actions();

    store.send(PipelineAction::Refresh).await.ok();
    store.send(PipelineAction::Refresh).await.ok();

    tokio::time::sleep(Duration::from_millis(50)).await;

    let count1 = drain(&mut rx1);
    let count2 = drain(&mut rx2);

    assert_eq!(count1, 2);
    assert_eq!(count2, 2);
}

/// An observer waiting on a dropped store sees the channel close.
#[tokio::test]
async fn test_observer_sees_channel_close_on_store_drop() {
    use tokio::sync::oneshot;

    let store = Store::new(PipelineState::default(), PipelineReducer, PipelineEnv);

    let (ready_tx, ready_rx) = oneshot::channel();

    let mut observer = store.subscribe_actions();
    let wait_handle = tokio::spawn(async move {
        ready_tx.send(()).ok();
        observer.recv().await
    });

    ready_rx.await.ok();
    tokio::time::sleep(Duration::from_millis(50)).await;

    drop(store);

    let result = wait_handle.await.expect("Observer task panicked");
    assert!(matches!(
        result,
        Err(tokio::sync::broadcast::error::RecvError::Closed)
    ));
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Count available actions in a receiver without blocking
fn drain(rx: &mut tokio::sync::broadcast::Receiver<PipelineAction>) -> usize {
    let mut count = 0;
    loop {
        match rx.try_recv() {
            Ok(_) => count += 1,
            Err(tokio::sync::broadcast::error::TryRecvError::Lagged(_)) => continue,
            Err(_) => break,
        }
    }
    count
}
