//! Runtime wrapper that owns the auth feed consumer.

use crate::error::StartError;
use crate::session::{SessionAction, SessionEnvironment, SessionReducer, SessionState};
use futures::StreamExt;
use marquee_core::auth::{AuthGateway, Role};
use marquee_runtime::{EffectHandle, Store, StoreError};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, broadcast};
use tokio::task::JoinHandle;

type SessionRuntime = Store<SessionState, SessionAction, SessionEnvironment, SessionReducer>;

/// Store for the operator session.
///
/// Owns the process's one auth feed subscription: [`SessionStore::start`]
/// subscribes through the gateway and pumps every transition into the
/// reducer until [`SessionStore::shutdown`] drops the stream.
pub struct SessionStore {
    store: SessionRuntime,
    auth: Arc<dyn AuthGateway>,
    started: AtomicBool,
    shutdown_tx: broadcast::Sender<()>,
    consumer: Mutex<Option<JoinHandle<()>>>,
}

impl SessionStore {
    /// Create the store. Nothing is subscribed until [`SessionStore::start`].
    #[must_use]
    pub fn new(environment: SessionEnvironment) -> Self {
        let auth = Arc::clone(&environment.auth);
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            store: Store::new(SessionState::new(), SessionReducer::new(), environment),
            auth,
            started: AtomicBool::new(false),
            shutdown_tx,
            consumer: Mutex::new(None),
        }
    }

    /// Subscribe to the auth feed and start mirroring it.
    ///
    /// A refused subscription is reported through
    /// [`SessionAction::AuthFeedFailed`] and `start` still returns `Ok`: the
    /// session then reads as resolved and signed out. There is no automatic
    /// resubscription either way.
    ///
    /// # Errors
    ///
    /// [`StartError::AlreadyStarted`] if the consumer is already running.
    pub async fn start(&self) -> Result<(), StartError> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(StartError::AlreadyStarted);
        }

        let stream = match self.auth.subscribe().await {
            Ok(stream) => stream,
            Err(error) => {
                tracing::error!(%error, "auth feed subscription refused");
                if let Err(send_error) = self
                    .store
                    .send(SessionAction::AuthFeedFailed {
                        error: error.to_string(),
                    })
                    .await
                {
                    tracing::debug!(%send_error, "session store already shutting down");
                }
                return Ok(());
            }
        };

        let store = self.store.clone();
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let handle = tokio::spawn(async move {
            let mut stream = stream;
            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => break,
                    item = stream.next() => match item {
                        Some(Ok(change)) => {
                            if store.send(SessionAction::AuthChanged { change }).await.is_err() {
                                break;
                            }
                        }
                        Some(Err(error)) => {
                            tracing::error!(%error, "auth feed failed, session frozen");
                            if let Err(send_error) = store
                                .send(SessionAction::AuthFeedFailed {
                                    error: error.to_string(),
                                })
                                .await
                            {
                                tracing::debug!(%send_error, "session store already shutting down");
                            }
                            break;
                        }
                        None => {
                            tracing::info!("auth feed ended");
                            break;
                        }
                    }
                }
            }
        });

        *self.consumer.lock().await = Some(handle);
        Ok(())
    }

    /// Stop the feed consumer and drain in-flight effects.
    ///
    /// Dropping the consumer releases the gateway subscription.
    ///
    /// # Errors
    ///
    /// [`StoreError::ShutdownTimeout`] if effects were still running when
    /// `timeout` elapsed.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        let _ = self.shutdown_tx.send(());
        if let Some(handle) = self.consumer.lock().await.take() {
            if let Err(join_error) = handle.await {
                tracing::warn!(%join_error, "session feed consumer aborted");
            }
        }
        self.store.shutdown(timeout).await
    }

    /// Snapshot of the current session.
    pub async fn state(&self) -> SessionState {
        self.store.state(Clone::clone).await
    }

    /// Send one action into the session reducer.
    ///
    /// Hosts use this to push [`SessionAction::OrdersUpdated`] and to request
    /// a sign-out directly.
    ///
    /// # Errors
    ///
    /// [`StoreError::ShutdownInProgress`] once shutdown has begun.
    pub async fn send(&self, action: SessionAction) -> Result<EffectHandle, StoreError> {
        self.store.send(action).await
    }

    /// Send an action and wait for a matching follow-up produced by its
    /// effects.
    ///
    /// # Errors
    ///
    /// [`StoreError::Timeout`] if no matching action arrives within `timeout`.
    pub async fn send_and_wait_for<F>(
        &self,
        action: SessionAction,
        predicate: F,
        timeout: Duration,
    ) -> Result<SessionAction, StoreError>
    where
        F: Fn(&SessionAction) -> bool,
    {
        self.store.send_and_wait_for(action, predicate, timeout).await
    }

    /// Cheap cloneable handle other components read the session through.
    #[must_use]
    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            store: self.store.clone(),
        }
    }
}

/// Shared read and signal access to the live session.
///
/// Handles clone cheaply and every clone observes the same state, so other
/// components take a `SessionHandle` instead of holding the store itself.
#[derive(Clone)]
pub struct SessionHandle {
    store: SessionRuntime,
}

impl SessionHandle {
    /// Snapshot of the current session.
    pub async fn snapshot(&self) -> SessionState {
        self.store.state(Clone::clone).await
    }

    /// Whether a session currently exists.
    pub async fn is_signed_in(&self) -> bool {
        self.store.state(|state| state.is_login).await
    }

    /// Role of the current session.
    pub async fn role(&self) -> Role {
        self.store.state(|state| state.role).await
    }

    /// Ask the gateway to end the session.
    ///
    /// Fire-and-forget: a request sent after shutdown began is dropped.
    pub async fn request_sign_out(&self) {
        if let Err(error) = self.store.send(SessionAction::SignOutRequested).await {
            tracing::debug!(%error, "sign-out request dropped during shutdown");
        }
    }

    /// Observe actions produced by session effects, such as
    /// [`SessionAction::SignOutSucceeded`].
    #[must_use]
    pub fn subscribe_actions(&self) -> broadcast::Receiver<SessionAction> {
        self.store.subscribe_actions()
    }
}
