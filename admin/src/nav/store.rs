//! Runtime wrapper that follows the router's path changes.

use crate::error::StartError;
use crate::nav::{
    HeaderModel, NavAction, NavEntry, NavEnvironment, NavReducer, NavState, header_model,
};
use crate::session::SessionHandle;
use futures::StreamExt;
use marquee_core::routing::Router;
use marquee_runtime::{EffectHandle, Store, StoreError};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, broadcast};
use tokio::task::JoinHandle;

type NavRuntime = Store<NavState, NavAction, NavEnvironment, NavReducer>;

/// Store for the navigation header.
///
/// Follows the router's change stream so the active entry tracks the path
/// in effect, and runs the auth button against the live session.
pub struct NavStore {
    store: NavRuntime,
    router: Arc<dyn Router>,
    session: SessionHandle,
    started: AtomicBool,
    shutdown_tx: broadcast::Sender<()>,
    consumer: Mutex<Option<JoinHandle<()>>>,
}

impl NavStore {
    /// Create the store positioned at the router's current path.
    #[must_use]
    pub fn new(entries: Vec<NavEntry>, environment: NavEnvironment) -> Self {
        let router = Arc::clone(&environment.router);
        let session = environment.session.clone();
        let current = router.current();
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            store: Store::new(
                NavState::new(entries, current),
                NavReducer::new(),
                environment,
            ),
            router,
            session,
            started: AtomicBool::new(false),
            shutdown_tx,
            consumer: Mutex::new(None),
        }
    }

    /// Follow the router's path changes.
    ///
    /// # Errors
    ///
    /// [`StartError::AlreadyStarted`] if the consumer is already running.
    pub async fn start(&self) -> Result<(), StartError> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(StartError::AlreadyStarted);
        }

        let mut stream = self.router.changes().await;
        let store = self.store.clone();
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => break,
                    item = stream.next() => match item {
                        Some(path) => {
                            if store.send(NavAction::RouteChanged { path }).await.is_err() {
                                break;
                            }
                        }
                        None => {
                            tracing::info!("route feed ended");
                            break;
                        }
                    }
                }
            }
        });

        *self.consumer.lock().await = Some(handle);
        Ok(())
    }

    /// Stop the route consumer and drain in-flight effects.
    ///
    /// # Errors
    ///
    /// [`StoreError::ShutdownTimeout`] if effects were still running when
    /// `timeout` elapsed.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        let _ = self.shutdown_tx.send(());
        if let Some(handle) = self.consumer.lock().await.take() {
            if let Err(join_error) = handle.await {
                tracing::warn!(%join_error, "route consumer aborted");
            }
        }
        self.store.shutdown(timeout).await
    }

    /// Rendered header for the current session and path.
    pub async fn header(&self) -> HeaderModel {
        let session = self.session.snapshot().await;
        let nav = self.store.state(Clone::clone).await;
        header_model(&session, &nav)
    }

    /// Press the auth button.
    ///
    /// Signed in this asks the session to sign out; signed out it navigates
    /// to the sign-in page.
    ///
    /// # Errors
    ///
    /// [`StoreError::ShutdownInProgress`] once shutdown has begun.
    pub async fn press_auth_button(&self) -> Result<EffectHandle, StoreError> {
        self.store.send(NavAction::AuthButtonPressed).await
    }

    /// Snapshot of the navigation state.
    pub async fn state(&self) -> NavState {
        self.store.state(Clone::clone).await
    }
}
