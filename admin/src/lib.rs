//! # Marquee Admin
//!
//! Back-office components for the Marquee event platform: a live events
//! table mirrored from the record feed, the operator session, and the
//! navigation header that ties the two together.
//!
//! ## Architecture
//!
//! Each surface is a reducer-driven component with its own store. The
//! stores share nothing; they talk to the outside world through the
//! collaborator traits in `marquee-core` and to each other through
//! injected handles.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          AdminApp                            │
//! │                                                              │
//! │  ┌───────────────┐   ┌──────────────┐   ┌────────────────┐   │
//! │  │ SessionStore  │◄──│   NavStore   │   │  EventsStore   │   │
//! │  │               │   │              │   │                │   │
//! │  │ auth feed ──► │   │ route feed ─►│   │ record feed ─► │   │
//! │  │ role, login   │   │ active entry │   │ filter / sort  │   │
//! │  │ sign-out      │   │ header model │   │ page / delete  │   │
//! │  └───────┬───────┘   └──────┬───────┘   └───────┬────────┘   │
//! │          │                  │                   │            │
//! │          ▼                  ▼                   ▼            │
//! │     AuthGateway          Router          CollectionStore     │
//! │                                        Confirmer + Notifier  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Feeds are push based: the collection store re-sends the whole
//! collection on every change and the mirror replaces its records
//! wholesale. Deletes are never applied locally; the table only changes
//! when the feed echoes the removal back.
//!
//! ## Components
//!
//! - [`session`]: mirrors the authentication feed into
//!   [`session::SessionState`] and runs the sign-out flow.
//! - [`nav`]: navigation header with exact-path highlighting and an
//!   admin-gated dashboard link, rendered via [`nav::header_model`].
//! - [`events`]: live view over the `events` collection with filtering,
//!   per-column sorting, pagination and confirmed deletes.
//! - [`app`]: wires the stores to their collaborators and manages
//!   startup and shutdown order.
//!
//! ## Usage
//!
//! See [`app::AdminApp`] for the wiring entry point, and the component
//! modules for their reducers and tests.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod app;
pub mod config;
pub mod events;
pub mod nav;
pub mod session;

/// Error types for component store lifecycles
pub mod error {
    use thiserror::Error;

    /// Errors that can occur when starting a component store
    #[derive(Error, Debug, PartialEq, Eq)]
    pub enum StartError {
        /// The store's feed consumer is already running
        ///
        /// Each store holds at most one live subscription. Starting a
        /// second consumer would double-apply every pushed snapshot.
        #[error("feed consumer already started")]
        AlreadyStarted,
    }
}

pub use app::{AdminApp, Collaborators};
pub use config::AdminConfig;
pub use error::StartError;
pub use events::{EventsAction, EventsReducer, EventsState, EventsStore};
pub use nav::{HeaderModel, NavAction, NavReducer, NavState, NavStore};
pub use session::{SessionAction, SessionHandle, SessionReducer, SessionState, SessionStore};
