//! Remote collection store abstraction: push-snapshot subscriptions and
//! delete-by-id mutations.
//!
//! The remote store owns the data. Marquee never edits mirrored records in
//! place; it subscribes to a collection and receives **complete snapshots** on
//! every change, and it issues mutations (delete) that only become visible
//! when a later snapshot reflects them.
//!
//! # Design
//!
//! The `CollectionStore` trait is deliberately minimal:
//!
//! - Subscribe to a collection, ordered by a field, yielding full snapshots
//! - Delete a record by id
//!
//! Anything else the remote store can do (queries, partial updates, creates)
//! is out of scope here; record creation and editing happen on dedicated
//! screens that talk to the store directly.
//!
//! # Subscription lifetime
//!
//! Dropping the [`SnapshotStream`] releases the subscription. The component
//! runtime that owns the stream drops it exactly once at teardown; there is no
//! separate unsubscribe call to forget.
//!
//! # Implementations
//!
//! - `InMemoryCollectionStore` (in `marquee-testing` crate): scripted
//!   snapshots for fast, deterministic tests
//! - Production adapters live with the deployment, not in this workspace

use futures::Stream;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;
use thiserror::Error;

/// Error type for `RecordId` parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid record ID: {0}")]
pub struct ParseRecordIdError(String);

/// Opaque identifier the remote store assigns to a record.
///
/// # Design
///
/// `RecordId` is a newtype wrapper around `String` that provides:
/// - Type safety (can't accidentally use a regular string)
/// - Clear intent in function signatures
/// - Serialization support
///
/// Ids are store-assigned and carry no structure Marquee relies on. Every
/// per-row command resolves its record through this id, never through a
/// positional index into the current view.
///
/// # Validation
///
/// - `FromStr::from_str()`: Validates input (rejects empty strings)
/// - `From::from()` and `new()`: No validation (for store-assigned ids)
///
/// # Examples
///
/// ```
/// use marquee_core::collection::RecordId;
///
/// let id = RecordId::new("evt-8f3a");
/// assert_eq!(id.as_str(), "evt-8f3a");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    /// Create a new `RecordId` from a string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the record ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert the `RecordId` into its inner `String`.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = ParseRecordIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseRecordIdError("Record ID cannot be empty".to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Name of a collection in the remote store (for example `"events"`).
///
/// # Examples
///
/// ```
/// use marquee_core::collection::CollectionName;
///
/// let name = CollectionName::new("events");
/// assert_eq!(name.as_str(), "events");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollectionName(String);

impl CollectionName {
    /// Create a new `CollectionName` from a string.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the collection name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CollectionName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One record as the remote store ships it: the store-assigned id plus the
/// record's fields as loosely typed JSON.
///
/// Applications decode the fields into their own record types; fields they
/// don't know pass through untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Store-assigned record id
    pub id: RecordId,
    /// The record's fields
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl Document {
    /// Create a document from an id and its fields.
    #[must_use]
    pub const fn new(id: RecordId, fields: serde_json::Map<String, serde_json::Value>) -> Self {
        Self { id, fields }
    }

    /// Look up a field value by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.fields.get(name)
    }

    /// Look up a string field by name.
    #[must_use]
    pub fn text_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(serde_json::Value::as_str)
    }
}

/// A complete listing of a collection at one point in time.
///
/// Every emission replaces the previous one wholesale; snapshots are never
/// merged or partially applied.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Snapshot {
    /// All documents in the collection, in the subscription's order
    pub documents: Vec<Document>,
}

impl Snapshot {
    /// Create a snapshot from a document listing.
    #[must_use]
    pub const fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Number of documents in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// What to subscribe to: a collection, ordered ascending by one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionQuery {
    /// The collection to watch
    pub collection: CollectionName,
    /// Field the store orders the snapshot by (ascending)
    pub order_by: String,
}

impl CollectionQuery {
    /// Create a query over `collection` ordered ascending by `order_by`.
    #[must_use]
    pub fn new(collection: CollectionName, order_by: impl Into<String>) -> Self {
        Self {
            collection,
            order_by: order_by.into(),
        }
    }
}

/// Type alias for a stream of collection snapshots.
///
/// An `Err` item means the subscription itself failed; the stream is dead
/// after that and the subscriber must treat the mirror as frozen. There is no
/// automatic resubscription.
pub type SnapshotStream = Pin<Box<dyn Stream<Item = Result<Snapshot, CollectionError>> + Send>>;

/// Errors that can occur during collection store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// The subscription could not be established or broke down.
    #[error("Subscription to '{collection}' failed: {reason}")]
    SubscriptionFailed {
        /// The collection that was being watched
        collection: CollectionName,
        /// Store-reported reason
        reason: String,
    },

    /// The record to mutate does not exist.
    #[error("Record '{id}' not found in '{collection}'")]
    RecordNotFound {
        /// The collection that was addressed
        collection: CollectionName,
        /// The missing record id
        id: RecordId,
    },

    /// The caller is not allowed to perform the operation.
    #[error("Permission denied on '{collection}': {reason}")]
    PermissionDenied {
        /// The collection that was addressed
        collection: CollectionName,
        /// Store-reported reason
        reason: String,
    },

    /// Transport-level failure talking to the store.
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

/// Remote collection store abstraction.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to be safely used in async contexts
/// and shared across threads.
///
/// # Dyn Compatibility
///
/// This trait uses explicit `Pin<Box<dyn Future>>` returns instead of
/// `async fn` to enable trait object usage (`Arc<dyn CollectionStore>`). This
/// is required for the effect system where reducers create effects that
/// capture the store.
pub trait CollectionStore: Send + Sync {
    /// Subscribe to a collection.
    ///
    /// The returned stream yields a **complete snapshot** on every change,
    /// ordered per the query. The first snapshot describes the current
    /// contents. Dropping the stream releases the subscription.
    ///
    /// # Errors
    ///
    /// - `SubscriptionFailed`: The subscription could not be established
    /// - `PermissionDenied`: The caller may not watch this collection
    /// - `ConnectionError`: Transport failure
    fn subscribe(
        &self,
        query: CollectionQuery,
    ) -> Pin<Box<dyn Future<Output = Result<SnapshotStream, CollectionError>> + Send + '_>>;

    /// Delete a record by id.
    ///
    /// Success means the store accepted the deletion. The mirrored listing
    /// only changes when a later snapshot omits the record; callers must not
    /// splice their local copy.
    ///
    /// # Errors
    ///
    /// - `RecordNotFound`: No record with this id
    /// - `PermissionDenied`: The caller may not delete from this collection
    /// - `ConnectionError`: Transport failure
    fn delete_record(
        &self,
        collection: CollectionName,
        id: RecordId,
    ) -> Pin<Box<dyn Future<Output = Result<(), CollectionError>> + Send + '_>>;
}
