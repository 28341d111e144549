//! Runtime wrapper that owns the collection feed consumer.

use crate::error::StartError;
use crate::events::view::{self, TableView};
use crate::events::{EventsAction, EventsEnvironment, EventsReducer, EventsState, ViewState};
use futures::StreamExt;
use marquee_core::collection::{CollectionQuery, CollectionStore};
use marquee_runtime::{EffectHandle, Store, StoreError};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, broadcast};
use tokio::task::JoinHandle;

type EventsRuntime = Store<EventsState, EventsAction, EventsEnvironment, EventsReducer>;

/// Store for the live events table.
///
/// Owns the component's one collection subscription: [`EventsStore::start`]
/// subscribes through the collection store and pumps every pushed snapshot
/// into the reducer until [`EventsStore::shutdown`] drops the stream.
pub struct EventsStore {
    store: EventsRuntime,
    records: Arc<dyn CollectionStore>,
    query: CollectionQuery,
    started: AtomicBool,
    shutdown_tx: broadcast::Sender<()>,
    consumer: Mutex<Option<JoinHandle<()>>>,
}

impl EventsStore {
    /// Create the store. Nothing is subscribed until [`EventsStore::start`].
    #[must_use]
    pub fn new(
        environment: EventsEnvironment,
        order_by: impl Into<String>,
        view: ViewState,
    ) -> Self {
        let records = Arc::clone(&environment.records);
        let query = CollectionQuery::new(environment.collection.clone(), order_by);
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            store: Store::new(EventsState::new(view), EventsReducer::new(), environment),
            records,
            query,
            started: AtomicBool::new(false),
            shutdown_tx,
            consumer: Mutex::new(None),
        }
    }

    /// Subscribe to the collection and start mirroring its pushes.
    ///
    /// A refused subscription is reported through
    /// [`EventsAction::SubscriptionFailed`] and `start` still returns `Ok`:
    /// the table then renders the error phase. There is no automatic
    /// resubscription either way.
    ///
    /// # Errors
    ///
    /// [`StartError::AlreadyStarted`] if the consumer is already running.
    pub async fn start(&self) -> Result<(), StartError> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(StartError::AlreadyStarted);
        }

        let stream = match self.records.subscribe(self.query.clone()).await {
            Ok(stream) => stream,
            Err(error) => {
                tracing::error!(
                    %error,
                    collection = %self.query.collection,
                    "collection subscription refused"
                );
                if let Err(send_error) = self
                    .store
                    .send(EventsAction::SubscriptionFailed {
                        error: error.to_string(),
                    })
                    .await
                {
                    tracing::debug!(%send_error, "events store already shutting down");
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
                        Some(Ok(snapshot)) => {
                            if store.send(EventsAction::SnapshotArrived { snapshot }).await.is_err() {
                                break;
                            }
                        }
                        Some(Err(error)) => {
                            tracing::error!(%error, "collection feed failed, listing frozen");
                            if let Err(send_error) = store
                                .send(EventsAction::SubscriptionFailed {
                                    error: error.to_string(),
                                })
                                .await
                            {
                                tracing::debug!(%send_error, "events store already shutting down");
                            }
                            break;
                        }
                        None => {
                            tracing::info!("collection feed ended");
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
    /// Dropping the consumer releases the collection subscription. A delete
    /// still in flight runs to completion within `timeout`.
    ///
    /// # Errors
    ///
    /// [`StoreError::ShutdownTimeout`] if effects were still running when
    /// `timeout` elapsed.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        let _ = self.shutdown_tx.send(());
        if let Some(handle) = self.consumer.lock().await.take() {
            if let Err(join_error) = handle.await {
                tracing::warn!(%join_error, "events feed consumer aborted");
            }
        }
        self.store.shutdown(timeout).await
    }

    /// Render the table projection for the current state.
    pub async fn table(&self) -> TableView {
        self.store.state(view::table_view).await
    }

    /// Snapshot of the full component state.
    pub async fn state(&self) -> EventsState {
        self.store.state(Clone::clone).await
    }

    /// Send one action into the events reducer.
    ///
    /// Hosts drive the view through this: filtering, sorting, paging, and
    /// the delete and form-navigation flows.
    ///
    /// # Errors
    ///
    /// [`StoreError::ShutdownInProgress`] once shutdown has begun.
    pub async fn send(&self, action: EventsAction) -> Result<EffectHandle, StoreError> {
        self.store.send(action).await
    }

    /// Send an action and wait for a matching follow-up produced by its
    /// effects, such as the verdict of a delete.
    ///
    /// # Errors
    ///
    /// [`StoreError::Timeout`] if no matching action arrives within `timeout`.
    pub async fn send_and_wait_for<F>(
        &self,
        action: EventsAction,
        predicate: F,
        timeout: Duration,
    ) -> Result<EventsAction, StoreError>
    where
        F: Fn(&EventsAction) -> bool,
    {
        self.store.send_and_wait_for(action, predicate, timeout).await
    }

    /// Observe actions produced by events effects, such as
    /// [`EventsAction::DeleteSucceeded`].
    #[must_use]
    pub fn subscribe_actions(&self) -> broadcast::Receiver<EventsAction> {
        self.store.subscribe_actions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::environment::EventRoutes;
    use crate::events::types::LoadPhase;
    use marquee_core::collection::{CollectionError, CollectionName, RecordId};
    use marquee_core::routing::RoutePath;
    use marquee_testing::helpers::event_snapshot;
    use marquee_testing::{
        InMemoryCollectionStore, RecordingNotifier, RecordingRouter, ScriptedConfirmer, test_clock,
    };

    fn env_with(records: Arc<InMemoryCollectionStore>) -> EventsEnvironment {
        EventsEnvironment::new(
            records,
            CollectionName::new("events"),
            Arc::new(ScriptedConfirmer::new()),
            Arc::new(RecordingNotifier::new()),
            Arc::new(RecordingRouter::new()),
            Arc::new(test_clock()),
            EventRoutes::new(
                RoutePath::new("/admin/events/create"),
                RoutePath::new("/admin/events/update"),
            ),
        )
    }

    #[tokio::test]
    #[allow(clippy::unwrap_used)] // Test code
    async fn mirrors_the_collection_feed() {
        let records = Arc::new(InMemoryCollectionStore::new());
        records.push_snapshot(event_snapshot(&[("e1", "Opera Night")]));
        let store = EventsStore::new(env_with(Arc::clone(&records)), "title", ViewState::default());

        store.start().await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let state = store.state().await;
        assert_eq!(state.phase, LoadPhase::Populated);
        assert_eq!(state.records.len(), 1);
        assert_eq!(state.records[0].id, RecordId::new("e1"));

        let queries = records.queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].order_by, "title");

        store.shutdown(Duration::from_secs(1)).await.unwrap();
    }

    #[tokio::test]
    #[allow(clippy::unwrap_used)] // Test code
    async fn second_start_is_refused() {
        let records = Arc::new(InMemoryCollectionStore::new());
        let store = EventsStore::new(env_with(records), "title", ViewState::default());

        store.start().await.unwrap();
        let second = store.start().await;

        assert_eq!(second, Err(StartError::AlreadyStarted));

        store.shutdown(Duration::from_secs(1)).await.unwrap();
    }

    #[tokio::test]
    #[allow(clippy::unwrap_used)] // Test code
    async fn refused_subscription_renders_the_error_phase() {
        let records = Arc::new(InMemoryCollectionStore::new());
        records.fail_next_subscribe(CollectionError::ConnectionError("store offline".to_string()));
        let store = EventsStore::new(env_with(records), "title", ViewState::default());

        store.start().await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let state = store.state().await;
        assert_eq!(state.phase, LoadPhase::Error);
        assert!(state.feed_error.is_some());

        store.shutdown(Duration::from_secs(1)).await.unwrap();
    }
}
