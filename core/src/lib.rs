//! # Marquee Core
//!
//! Core traits and types for the Marquee admin console engine.
//!
//! Marquee mirrors a remotely-pushed collection into local state, derives a
//! filtered/sorted/paginated view over the mirror, and mediates destructive
//! commands through confirmation dialogs and notifications. This crate
//! provides the abstractions that the runtime and application crates build on.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature
//! - **Action**: All possible inputs to a reducer (commands plus feedback events)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies via traits
//!
//! ## Collaborator Boundaries
//!
//! External systems are abstracted behind dyn-compatible traits so reducers
//! never perform I/O directly:
//!
//! - [`collection::CollectionStore`] — push-snapshot subscriptions and
//!   delete-by-id mutations against the remote collection store
//! - [`auth::AuthGateway`] — auth-state change stream and sign-out
//! - [`dialog::Confirmer`] — single-shot confirmation dialogs
//! - [`notify::Notifier`] — fire-and-forget operator notices
//! - [`routing::Router`] — current path, path changes, navigation
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Explicit Effects (no hidden I/O)
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```ignore
//! use marquee_core::{Effect, Reducer, SmallVec, smallvec};
//!
//! #[derive(Clone, Debug)]
//! struct PanelState {
//!     open: bool,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum PanelAction {
//!     Toggle,
//! }
//!
//! struct PanelReducer;
//!
//! impl Reducer for PanelReducer {
//!     type State = PanelState;
//!     type Action = PanelAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut PanelState,
//!         action: PanelAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<PanelAction>; 4]> {
//!         match action {
//!             PanelAction::Toggle => {
//!                 state.open = !state.open;
//!                 smallvec![Effect::None]
//!             }
//!         }
//!     }
//! }
//! ```

pub mod auth;
pub mod collection;
pub mod dialog;
pub mod effect;
pub mod effect_macros;
pub mod environment;
pub mod notify;
pub mod reducer;
pub mod routing;

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use effect::Effect;
pub use reducer::Reducer;
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};
