//! Navigation header: static entries, exact-path highlighting, auth button.
//!
//! # Architecture
//!
//! ```text
//! Router ── changes() ──► NavStore consumer ── RouteChanged ──► NavState
//!                                                                  │
//! SessionHandle ──────────── header() ── header_model() ──────────►│
//!                                                                  ▼
//!                                                             HeaderModel
//!
//! AuthButtonPressed ──► signed in?  yes ── session.request_sign_out()
//!                                   no ─── router.navigate(login)
//! ```
//!
//! The header holds no copy of the session. [`NavStore::header`] reads it
//! live through the injected [`crate::session::SessionHandle`], so role
//! and sign-in changes show up without any bridging.

pub mod actions;
pub mod environment;
pub mod reducer;
pub mod store;
pub mod types;

pub use actions::NavAction;
pub use environment::NavEnvironment;
pub use reducer::NavReducer;
pub use store::NavStore;
pub use types::{
    HeaderEntry, HeaderModel, NavEntry, NavState, SIGN_IN_LABEL, SIGN_OUT_LABEL, default_entries,
    header_model,
};
