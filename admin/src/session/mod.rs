//! Operator session mirrored from the authentication feed.
//!
//! # Architecture
//!
//! ```text
//! AuthGateway ── subscribe() ──► SessionStore consumer
//!                                    │ AuthChanged / AuthFeedFailed
//!                                    ▼
//!                              SessionReducer ──► SessionState
//!                                    │
//!                  SignOutRequested  │ sign_out! then navigate!
//!                                    ▼
//!                           AuthGateway + Router
//! ```
//!
//! The session is non-optimistic end to end: nothing signs out locally
//! until the gateway confirms, and a broken feed freezes the mirrored
//! values rather than guessing. Other components read the session through
//! [`SessionHandle`] instead of holding the store.

pub mod actions;
pub mod environment;
pub mod reducer;
pub mod store;
pub mod types;

pub use actions::SessionAction;
pub use environment::SessionEnvironment;
pub use reducer::SessionReducer;
pub use store::{SessionHandle, SessionStore};
pub use types::SessionState;
