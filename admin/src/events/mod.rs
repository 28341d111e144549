//! Live events table: a pushed mirror with a derived, operator-driven view.
//!
//! # Architecture
//!
//! ```text
//! CollectionStore ── subscribe() ──► EventsStore consumer
//!                                        │ SnapshotArrived / SubscriptionFailed
//!                                        ▼
//! Filter / Sort / Page ─────────► EventsReducer ──► EventsState
//! Delete / Create / Update           │                  │
//!                                    │ confirm!          │ table_view()
//!                                    │ delete_record!    ▼
//!                                    │ notify!        TableView
//!                                    ▼ navigate!
//!                        Confirmer + CollectionStore
//!                          + Notifier + Router
//! ```
//!
//! The mirror is replaced wholesale on every push and never edited locally.
//! Filtering, sorting, and paging are derived per render from the raw
//! records, so a push can land between any two actions without invalidating
//! the operator's view; the page index just clamps to whatever remains.

pub mod actions;
pub mod environment;
pub mod reducer;
pub mod store;
pub mod types;
pub mod view;

pub use actions::EventsAction;
pub use environment::{EventRoutes, EventsEnvironment};
pub use reducer::EventsReducer;
pub use store::EventsStore;
pub use types::{
    ColumnSort, DEFAULT_PAGE_SIZE, DETAILS_PREVIEW_CHARS, EventRecord, EventsState, LoadPhase,
    SortColumn, SortDirection, ViewState,
};
pub use view::{EMPTY_ROW, EventRow, LOADING_ROW, TableBody, TableView, table_view};
