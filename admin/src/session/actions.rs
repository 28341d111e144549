//! Actions processed by the session reducer.

use marquee_core::auth::AuthStateChange;
use marquee_core::collection::RecordId;

/// Everything that can happen to the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionAction {
    /// The auth feed reported a state transition
    AuthChanged {
        /// The transition as shipped by the gateway
        change: AuthStateChange,
    },

    /// The auth feed broke; the session keeps its last values
    AuthFeedFailed {
        /// Gateway error message
        error: String,
    },

    /// The operator asked to sign out
    SignOutRequested,

    /// The gateway accepted the sign-out
    SignOutSucceeded,

    /// The gateway rejected the sign-out; the session is unchanged
    SignOutFailed {
        /// Gateway error message
        error: String,
    },

    /// The host attached a new order listing to the session
    OrdersUpdated {
        /// Order record ids, in the host's order
        orders: Vec<RecordId>,
    },
}
