//! In-memory collaborator doubles for the admin console
//!
//! Deterministic implementations of the collaborator traits:
//! - [`InMemoryCollectionStore`]: scripted snapshot feed with recorded deletes
//! - [`ScriptedConfirmer`]: queued confirmation responses
//! - [`RecordingNotifier`]: captures shown notices
//! - [`RecordingRouter`]: in-memory route state with recorded navigations
//! - [`StubAuthGateway`]: scripted session changes and sign-out outcomes

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Test utilities document panics where critical

use async_stream::stream;
use marquee_core::auth::{
    AuthError, AuthGateway, AuthStateChange, AuthStream, Credentials, Role,
};
use marquee_core::collection::{
    CollectionError, CollectionName, CollectionQuery, CollectionStore, RecordId, Snapshot,
    SnapshotStream,
};
use marquee_core::dialog::{ConfirmRequest, Confirmation, Confirmer};
use marquee_core::notify::{Notice, Notifier};
use marquee_core::routing::{Router, RoutePath, RouteStream};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tokio::sync::{mpsc, watch};

/// In-memory collection store with a scripted snapshot feed.
///
/// Subscribers receive the latest pushed snapshot immediately (if any), then
/// every snapshot pushed afterwards. Snapshots are delivered exactly as
/// pushed; callers build them in the order the remote query would return.
///
/// Deletes are recorded but do **not** emit a new snapshot. Tests that want
/// the non-optimistic flow push a follow-up snapshot without the record, the
/// same way the real feed behaves.
///
/// # Example
///
/// ```
/// use marquee_testing::{InMemoryCollectionStore, helpers};
///
/// let store = InMemoryCollectionStore::new();
/// store.push_snapshot(helpers::event_snapshot(&[("e1", "Ballet Night")]));
/// assert_eq!(store.deletions().len(), 0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryCollectionStore {
    latest: Arc<RwLock<Option<Snapshot>>>,
    subscribers: Arc<Mutex<Vec<mpsc::UnboundedSender<Result<Snapshot, CollectionError>>>>>,
    queries: Arc<Mutex<Vec<CollectionQuery>>>,
    deletions: Arc<Mutex<Vec<(CollectionName, RecordId)>>>,
    delete_failures: Arc<Mutex<VecDeque<CollectionError>>>,
    subscribe_failures: Arc<Mutex<VecDeque<CollectionError>>>,
}

impl InMemoryCollectionStore {
    /// Create a new empty collection store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a snapshot to all active subscribers and remember it as the
    /// latest, so future subscribers receive it on subscribe.
    pub fn push_snapshot(&self, snapshot: Snapshot) {
        *self.latest.write().unwrap() = Some(snapshot.clone());
        self.subscribers
            .lock()
            .unwrap()
            .retain(|tx| tx.send(Ok(snapshot.clone())).is_ok());
    }

    /// Push a subscription error to all active subscribers.
    ///
    /// Streams end after an error item, matching the dead-subscription
    /// contract of [`SnapshotStream`].
    pub fn push_error(&self, error: CollectionError) {
        self.subscribers
            .lock()
            .unwrap()
            .retain(|tx| tx.send(Err(error.clone())).is_ok());
    }

    /// Make the next `subscribe` call fail with the given error.
    pub fn fail_next_subscribe(&self, error: CollectionError) {
        self.subscribe_failures.lock().unwrap().push_back(error);
    }

    /// Make the next `delete_record` call fail with the given error.
    ///
    /// The call is still recorded in [`Self::deletions`].
    pub fn fail_next_delete(&self, error: CollectionError) {
        self.delete_failures.lock().unwrap().push_back(error);
    }

    /// All `delete_record` calls so far, in order.
    #[must_use]
    pub fn deletions(&self) -> Vec<(CollectionName, RecordId)> {
        self.deletions.lock().unwrap().clone()
    }

    /// All queries passed to `subscribe` so far, in order.
    #[must_use]
    pub fn queries(&self) -> Vec<CollectionQuery> {
        self.queries.lock().unwrap().clone()
    }

    /// Number of subscriptions whose stream is still alive.
    ///
    /// A subscription stops counting once its stream has been dropped, which
    /// is how tests assert the release-exactly-once contract.
    #[must_use]
    pub fn active_subscriptions(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap()
            .iter()
            .filter(|tx| !tx.is_closed())
            .count()
    }
}

impl CollectionStore for InMemoryCollectionStore {
    fn subscribe(
        &self,
        query: CollectionQuery,
    ) -> Pin<Box<dyn Future<Output = Result<SnapshotStream, CollectionError>> + Send + '_>> {
        Box::pin(async move {
            if let Some(error) = self.subscribe_failures.lock().unwrap().pop_front() {
                return Err(error);
            }
            self.queries.lock().unwrap().push(query);

            let (tx, mut rx) = mpsc::unbounded_channel();
            let initial = self.latest.read().unwrap().clone();
            self.subscribers.lock().unwrap().push(tx);

            let stream = stream! {
                if let Some(snapshot) = initial {
                    yield Ok(snapshot);
                }
                while let Some(item) = rx.recv().await {
                    let failed = item.is_err();
                    yield item;
                    if failed {
                        break;
                    }
                }
            };

            Ok(Box::pin(stream) as SnapshotStream)
        })
    }

    fn delete_record(
        &self,
        collection: CollectionName,
        id: RecordId,
    ) -> Pin<Box<dyn Future<Output = Result<(), CollectionError>> + Send + '_>> {
        Box::pin(async move {
            self.deletions.lock().unwrap().push((collection, id));
            match self.delete_failures.lock().unwrap().pop_front() {
                Some(error) => Err(error),
                None => Ok(()),
            }
        })
    }
}

/// Confirmer that answers from a queued script.
///
/// Each `confirm` call pops the next queued response. An empty script
/// declines, mirroring a dialog that cannot be shown.
///
/// # Example
///
/// ```
/// use marquee_testing::ScriptedConfirmer;
/// use marquee_core::dialog::Confirmation;
///
/// let confirmer = ScriptedConfirmer::new();
/// confirmer.push_response(Confirmation::confirmed());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScriptedConfirmer {
    responses: Arc<Mutex<VecDeque<Confirmation>>>,
    requests: Arc<Mutex<Vec<ConfirmRequest>>>,
}

impl ScriptedConfirmer {
    /// Create a confirmer with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next `confirm` call.
    pub fn push_response(&self, response: Confirmation) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// All requests presented so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<ConfirmRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(
        &self,
        request: ConfirmRequest,
    ) -> Pin<Box<dyn Future<Output = Confirmation> + Send + '_>> {
        Box::pin(async move {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(Confirmation::declined)
        })
    }
}

/// Notifier that records every notice it is asked to show.
#[derive(Clone, Debug, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    /// Create a notifier with no recorded notices.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices shown so far, in order.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(async move {
            self.notices.lock().unwrap().push(notice);
        })
    }
}

/// Router backed by an in-memory route value.
///
/// Programmatic navigation updates the current route **and** fires the
/// changes stream, the way a browser router does. [`Self::set_current`]
/// simulates an address-bar change without recording a navigation.
#[derive(Clone, Debug)]
pub struct RecordingRouter {
    current: Arc<watch::Sender<RoutePath>>,
    visited: Arc<Mutex<Vec<RoutePath>>>,
}

impl RecordingRouter {
    /// Create a router positioned at `/`.
    #[must_use]
    pub fn new() -> Self {
        Self::at(RoutePath::new("/"))
    }

    /// Create a router positioned at the given path.
    #[must_use]
    pub fn at(path: RoutePath) -> Self {
        let (tx, _rx) = watch::channel(path);
        Self {
            current: Arc::new(tx),
            visited: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Move to a path without recording a navigation, as if the operator
    /// edited the address bar.
    pub fn set_current(&self, path: RoutePath) {
        let _ = self.current.send(path);
    }

    /// All programmatic navigations so far, in order.
    #[must_use]
    pub fn visited(&self) -> Vec<RoutePath> {
        self.visited.lock().unwrap().clone()
    }
}

impl Default for RecordingRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl Router for RecordingRouter {
    fn current(&self) -> RoutePath {
        self.current.borrow().clone()
    }

    fn changes(&self) -> Pin<Box<dyn Future<Output = RouteStream> + Send + '_>> {
        Box::pin(async move {
            let mut rx = self.current.subscribe();
            let stream = stream! {
                let current = rx.borrow_and_update().clone();
                yield current;
                while rx.changed().await.is_ok() {
                    let next = rx.borrow_and_update().clone();
                    yield next;
                }
            };
            Box::pin(stream) as RouteStream
        })
    }

    fn navigate(&self, path: RoutePath) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(async move {
            self.visited.lock().unwrap().push(path.clone());
            let _ = self.current.send(path);
        })
    }
}

/// Auth gateway with scripted session changes and sign-out outcomes.
///
/// Subscribers receive the current session state immediately, then every
/// change pushed afterwards. `sign_out` succeeds unless a failure is queued;
/// it does **not** emit a session change by itself. Tests that want the real
/// gateway's behavior follow a successful sign-out with
/// `push_change(AuthStateChange::signed_out())`.
#[derive(Clone, Debug)]
pub struct StubAuthGateway {
    latest: Arc<RwLock<AuthStateChange>>,
    subscribers: Arc<Mutex<Vec<mpsc::UnboundedSender<Result<AuthStateChange, AuthError>>>>>,
    subscribe_failures: Arc<Mutex<VecDeque<AuthError>>>,
    sign_out_failures: Arc<Mutex<VecDeque<AuthError>>>,
    sign_out_calls: Arc<AtomicUsize>,
}

impl StubAuthGateway {
    /// Create a gateway with no active session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            latest: Arc::new(RwLock::new(AuthStateChange::signed_out())),
            subscribers: Arc::new(Mutex::new(Vec::new())),
            subscribe_failures: Arc::new(Mutex::new(VecDeque::new())),
            sign_out_failures: Arc::new(Mutex::new(VecDeque::new())),
            sign_out_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a gateway with an active session.
    #[must_use]
    pub fn signed_in(credentials: Credentials, role: Role) -> Self {
        let gateway = Self::new();
        *gateway.latest.write().unwrap() = AuthStateChange::signed_in(credentials, role);
        gateway
    }

    /// Push a session change to all subscribers and remember it as current.
    pub fn push_change(&self, change: AuthStateChange) {
        *self.latest.write().unwrap() = change.clone();
        self.subscribers
            .lock()
            .unwrap()
            .retain(|tx| tx.send(Ok(change.clone())).is_ok());
    }

    /// Push a subscription error to all subscribers.
    pub fn push_error(&self, error: AuthError) {
        self.subscribers
            .lock()
            .unwrap()
            .retain(|tx| tx.send(Err(error.clone())).is_ok());
    }

    /// Make the next `subscribe` call fail with the given error.
    pub fn fail_next_subscribe(&self, error: AuthError) {
        self.subscribe_failures.lock().unwrap().push_back(error);
    }

    /// Make the next `sign_out` call fail with the given error.
    pub fn fail_next_sign_out(&self, error: AuthError) {
        self.sign_out_failures.lock().unwrap().push_back(error);
    }

    /// Number of `sign_out` calls so far.
    #[must_use]
    pub fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }
}

impl Default for StubAuthGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthGateway for StubAuthGateway {
    fn subscribe(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<AuthStream, AuthError>> + Send + '_>> {
        Box::pin(async move {
            if let Some(error) = self.subscribe_failures.lock().unwrap().pop_front() {
                return Err(error);
            }

            let (tx, mut rx) = mpsc::unbounded_channel();
            let initial = self.latest.read().unwrap().clone();
            self.subscribers.lock().unwrap().push(tx);

            let stream = stream! {
                yield Ok(initial);
                while let Some(item) = rx.recv().await {
                    let failed = item.is_err();
                    yield item;
                    if failed {
                        break;
                    }
                }
            };

            Ok(Box::pin(stream) as AuthStream)
        })
    }

    fn sign_out(&self) -> Pin<Box<dyn Future<Output = Result<(), AuthError>> + Send + '_>> {
        Box::pin(async move {
            self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
            match self.sign_out_failures.lock().unwrap().pop_front() {
                Some(error) => Err(error),
                None => Ok(()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers;
    use futures::StreamExt;
    use marquee_core::auth::UserId;

    #[tokio::test]
    async fn subscriber_receives_latest_then_live_snapshots() {
        let store = InMemoryCollectionStore::new();
        store.push_snapshot(helpers::event_snapshot(&[("e1", "Ballet Night")]));

        let query = CollectionQuery::new(CollectionName::new("events"), "title");
        let mut stream = store.subscribe(query).await.unwrap();

        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(first.len(), 1);

        store.push_snapshot(helpers::event_snapshot(&[
            ("e1", "Ballet Night"),
            ("e2", "Jazz Brunch"),
        ]));
        let second = stream.next().await.unwrap().unwrap();
        assert_eq!(second.len(), 2);
    }

    #[tokio::test]
    async fn dropping_stream_releases_subscription() {
        let store = InMemoryCollectionStore::new();
        let query = CollectionQuery::new(CollectionName::new("events"), "title");

        let stream = store.subscribe(query).await.unwrap();
        assert_eq!(store.active_subscriptions(), 1);

        drop(stream);
        assert_eq!(store.active_subscriptions(), 0);
    }

    #[tokio::test]
    async fn stream_ends_after_error_item() {
        let store = InMemoryCollectionStore::new();
        let query = CollectionQuery::new(CollectionName::new("events"), "title");
        let mut stream = store.subscribe(query).await.unwrap();

        store.push_error(CollectionError::ConnectionError("feed went away".into()));
        assert!(stream.next().await.unwrap().is_err());
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn delete_records_call_without_emitting_snapshot() {
        let store = InMemoryCollectionStore::new();
        store.push_snapshot(helpers::event_snapshot(&[("e1", "Ballet Night")]));

        let query = CollectionQuery::new(CollectionName::new("events"), "title");
        let mut stream = store.subscribe(query).await.unwrap();
        let _ = stream.next().await;

        store
            .delete_record(CollectionName::new("events"), RecordId::new("e1"))
            .await
            .unwrap();

        assert_eq!(
            store.deletions(),
            vec![(CollectionName::new("events"), RecordId::new("e1"))]
        );
        // No snapshot was emitted for the delete
        store.push_snapshot(helpers::event_snapshot(&[]));
        let after = stream.next().await.unwrap().unwrap();
        assert!(after.is_empty());
    }

    #[tokio::test]
    async fn scripted_delete_failure_is_returned_once() {
        let store = InMemoryCollectionStore::new();
        store.fail_next_delete(CollectionError::PermissionDenied {
            collection: CollectionName::new("events"),
            reason: "viewer role".into(),
        });

        let first = store
            .delete_record(CollectionName::new("events"), RecordId::new("e1"))
            .await;
        assert!(first.is_err());

        let second = store
            .delete_record(CollectionName::new("events"), RecordId::new("e2"))
            .await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn confirmer_empty_script_declines() {
        let confirmer = ScriptedConfirmer::new();
        let response = confirmer
            .confirm(ConfirmRequest::new("Delete Event", "Are you sure?"))
            .await;
        assert!(!response.confirmed);
        assert_eq!(confirmer.requests().len(), 1);
    }

    #[tokio::test]
    async fn router_changes_yield_current_then_updates() {
        let router = RecordingRouter::at(RoutePath::new("/about"));
        let mut changes = router.changes().await;

        assert_eq!(changes.next().await.unwrap(), RoutePath::new("/about"));

        router.navigate(RoutePath::new("/login")).await;
        assert_eq!(changes.next().await.unwrap(), RoutePath::new("/login"));
        assert_eq!(router.visited(), vec![RoutePath::new("/login")]);
    }

    #[tokio::test]
    async fn auth_subscriber_sees_current_session_first() {
        let credentials = Credentials::new(UserId::new("u1"), "ops@example.com");
        let gateway = StubAuthGateway::signed_in(credentials.clone(), Role::Admin);

        let mut stream = gateway.subscribe().await.unwrap();
        let first = stream.next().await.unwrap().unwrap();
        assert!(first.is_signed_in());
        assert_eq!(first.credentials, Some(credentials));

        gateway.push_change(AuthStateChange::signed_out());
        let second = stream.next().await.unwrap().unwrap();
        assert!(!second.is_signed_in());
    }

    #[tokio::test]
    async fn sign_out_failure_is_scripted() {
        let gateway = StubAuthGateway::new();
        gateway.fail_next_sign_out(AuthError::SignOutFailed("network".into()));

        assert!(gateway.sign_out().await.is_err());
        assert!(gateway.sign_out().await.is_ok());
        assert_eq!(gateway.sign_out_calls(), 2);
    }
}
