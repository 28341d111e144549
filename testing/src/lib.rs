//! # Marquee Testing
//!
//! Testing utilities and collaborator doubles for the Marquee admin console.
//!
//! This crate provides:
//! - In-memory implementations of the collaborator traits (collection store,
//!   confirmer, notifier, router, auth gateway)
//! - A fluent Given-When-Then harness for reducer tests
//! - Deterministic clocks and snapshot builders
//! - Property-based testing strategies for collection snapshots
//!
//! ## Example
//!
//! ```ignore
//! use marquee_testing::{InMemoryCollectionStore, ScriptedConfirmer, helpers};
//! use marquee_core::dialog::Confirmation;
//!
//! #[tokio::test]
//! async fn delete_waits_for_confirmation() {
//!     let collection = InMemoryCollectionStore::new();
//!     collection.push_snapshot(helpers::event_snapshot(&[("e1", "Ballet Night")]));
//!
//!     let confirmer = ScriptedConfirmer::new();
//!     confirmer.push_response(Confirmation::confirmed());
//!
//!     // ... wire both into an environment and drive the store
//! }
//! ```

use chrono::{DateTime, Utc};
use marquee_core::environment::Clock;

/// In-memory collaborator doubles
pub mod collaborators;


/// Mock implementations of Environment traits
///
/// Deterministic stand-ins for ambient dependencies such as the clock.
/// The collaborator boundaries (collection store, dialogs, router, auth)
/// live in [`collaborators`].
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use marquee_testing::mocks::FixedClock;
    /// use marquee_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Test helpers and utilities
///
/// Builders for collection documents and snapshots, plus a tracing
/// initializer for integration tests.
pub mod helpers {
    use marquee_core::collection::{Document, RecordId, Snapshot};

    /// Install a tracing subscriber writing to the test output capture.
    ///
    /// Safe to call from every test; only the first call installs.
    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_test_writer()
            .try_init();
    }

    /// Build a document from an id and field pairs.
    ///
    /// # Example
    ///
    /// ```
    /// use marquee_testing::helpers::document;
    /// use serde_json::json;
    ///
    /// let doc = document("e1", [("title", json!("Ballet Night"))]);
    /// assert_eq!(doc.text_field("title"), Some("Ballet Night"));
    /// ```
    pub fn document<'a, I>(id: &str, fields: I) -> Document
    where
        I: IntoIterator<Item = (&'a str, serde_json::Value)>,
    {
        let mut map = serde_json::Map::new();
        for (name, value) in fields {
            map.insert(name.to_string(), value);
        }
        Document::new(RecordId::new(id), map)
    }

    /// Build a snapshot of event documents from `(id, title)` pairs.
    ///
    /// Documents appear in the snapshot in the given order, mirroring a
    /// collection feed that has already applied its ordering.
    #[must_use]
    pub fn event_snapshot(entries: &[(&str, &str)]) -> Snapshot {
        let documents = entries
            .iter()
            .map(|(id, title)| {
                document(
                    id,
                    [(
                        "title",
                        serde_json::Value::String((*title).to_string()),
                    )],
                )
            })
            .collect();
        Snapshot::new(documents)
    }
}

/// Property-based testing utilities using proptest
pub mod properties {
    use crate::helpers;
    use marquee_core::collection::{RecordId, Snapshot};
    use proptest::prelude::*;

    /// Strategy producing well-formed record ids.
    pub fn record_id_strategy() -> impl Strategy<Value = RecordId> {
        "[a-z0-9]{4,12}".prop_map(RecordId::new)
    }

    /// Strategy producing snapshots of event documents.
    ///
    /// Record ids are assigned sequentially so every document in a generated
    /// snapshot is uniquely addressable.
    pub fn snapshot_strategy(max_docs: usize) -> impl Strategy<Value = Snapshot> {
        prop::collection::vec(("[A-Za-z ]{0,20}", "[A-Za-z ]{0,16}"), 0..=max_docs).prop_map(
            |rows| {
                let documents = rows
                    .into_iter()
                    .enumerate()
                    .map(|(idx, (title, location))| {
                        helpers::document(
                            &format!("rec-{idx}"),
                            [
                                ("title", serde_json::Value::String(title)),
                                ("location", serde_json::Value::String(location)),
                            ],
                        )
                    })
                    .collect();
                Snapshot::new(documents)
            },
        )
    }
}

// Re-export commonly used items
pub use collaborators::{
    InMemoryCollectionStore, RecordingNotifier, RecordingRouter, ScriptedConfirmer, StubAuthGateway,
};
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::ReducerTest;
