//! Effect descriptions returned by reducers.
//!
//! Effects are NOT executed immediately. They are descriptions of what should
//! happen, returned from reducers and executed by the store runtime. Each
//! collaborator boundary (collection store, dialogs, notifier, router, auth
//! gateway) has an operation variant carrying the collaborator handle and the
//! callbacks that translate its outcome back into an action.
//!
//! # Callbacks
//!
//! Outcome callbacks return `Option<Action>`:
//!
//! - `Some(action)` — the action is fed back into the reducer
//! - `None` — the pipeline stops here (for example, a declined confirmation)
//!
//! # Construction
//!
//! Reducers normally build operation effects through the macros in
//! [`crate::effect_macros`] rather than spelling the variants out.

use crate::auth::{AuthError, AuthGateway};
use crate::collection::{CollectionError, CollectionName, CollectionStore, RecordId};
use crate::dialog::{ConfirmRequest, Confirmation, Confirmer};
use crate::notify::{Notice, Notifier};
use crate::routing::{RoutePath, Router};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

/// Effect type - describes a side effect to be executed.
///
/// # Type Parameters
///
/// - `Action`: The action type that effects can produce (feedback loop)
pub enum Effect<Action> {
    /// No-op effect
    None,

    /// Run effects in parallel
    Parallel(Vec<Effect<Action>>),

    /// Run effects sequentially
    Sequential(Vec<Effect<Action>>),

    /// Delayed action (for timeouts)
    Delay {
        /// How long to wait
        duration: Duration,
        /// Action to dispatch after delay
        action: Box<Action>,
    },

    /// Arbitrary async computation
    ///
    /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
    Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),

    /// Operation against the remote collection store
    Collection(CollectionOperation<Action>),

    /// Single-shot confirmation dialog
    Dialog(DialogOperation<Action>),

    /// Fire-and-forget operator notice
    Notify(NotifyOperation),

    /// Route change through the router
    Navigate(RouterOperation),

    /// Operation against the auth gateway
    Auth(AuthOperation<Action>),
}

/// Operations against the remote collection store.
///
/// Mutations only: snapshot subscriptions are long-lived and owned by the
/// component's runtime wrapper, not modeled as one-shot effects.
pub enum CollectionOperation<Action> {
    /// Delete a record by id.
    DeleteRecord {
        /// The collection store to call
        store: Arc<dyn CollectionStore>,
        /// Collection holding the record
        collection: CollectionName,
        /// Id of the record to delete
        id: RecordId,
        /// Produces the follow-up action on success
        on_success: Box<dyn FnOnce(()) -> Option<Action> + Send>,
        /// Produces the follow-up action on failure
        on_error: Box<dyn FnOnce(CollectionError) -> Option<Action> + Send>,
    },
}

/// Confirmation dialog operations.
pub enum DialogOperation<Action> {
    /// Present a single-shot confirm dialog and wait for the response.
    Confirm {
        /// The dialog presenter to call
        confirmer: Arc<dyn Confirmer>,
        /// What to ask
        request: ConfirmRequest,
        /// Produces the follow-up action from the response; returning `None`
        /// (typically on decline) ends the pipeline with no further action
        on_response: Box<dyn FnOnce(Confirmation) -> Option<Action> + Send>,
    },
}

/// Notification operations.
pub enum NotifyOperation {
    /// Show a notice to the operator. Fire-and-forget: there is no outcome
    /// callback because notices cannot fail in a way the domain cares about.
    Show {
        /// The notifier to call
        notifier: Arc<dyn Notifier>,
        /// The notice to show
        notice: Notice,
    },
}

/// Router operations.
pub enum RouterOperation {
    /// Navigate to a path. Fire-and-forget.
    Navigate {
        /// The router to call
        router: Arc<dyn Router>,
        /// Destination path
        path: RoutePath,
    },
}

/// Operations against the auth gateway.
pub enum AuthOperation<Action> {
    /// End the current session.
    SignOut {
        /// The gateway to call
        gateway: Arc<dyn AuthGateway>,
        /// Produces the follow-up action on success
        on_success: Box<dyn FnOnce(()) -> Option<Action> + Send>,
        /// Produces the follow-up action on failure
        on_error: Box<dyn FnOnce(AuthError) -> Option<Action> + Send>,
    },
}

// Manual Debug implementations since futures and callbacks don't implement Debug

impl<Action> std::fmt::Debug for Effect<Action>
where
    Action: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::None => write!(f, "Effect::None"),
            Effect::Parallel(effects) => f.debug_tuple("Effect::Parallel").field(effects).finish(),
            Effect::Sequential(effects) => {
                f.debug_tuple("Effect::Sequential").field(effects).finish()
            }
            Effect::Delay { duration, action } => f
                .debug_struct("Effect::Delay")
                .field("duration", duration)
                .field("action", action)
                .finish(),
            Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            Effect::Collection(op) => f.debug_tuple("Effect::Collection").field(op).finish(),
            Effect::Dialog(op) => f.debug_tuple("Effect::Dialog").field(op).finish(),
            Effect::Notify(op) => f.debug_tuple("Effect::Notify").field(op).finish(),
            Effect::Navigate(op) => f.debug_tuple("Effect::Navigate").field(op).finish(),
            Effect::Auth(op) => f.debug_tuple("Effect::Auth").field(op).finish(),
        }
    }
}

impl<Action> std::fmt::Debug for CollectionOperation<Action> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectionOperation::DeleteRecord { collection, id, .. } => f
                .debug_struct("DeleteRecord")
                .field("collection", collection)
                .field("id", id)
                .finish_non_exhaustive(),
        }
    }
}

impl<Action> std::fmt::Debug for DialogOperation<Action> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DialogOperation::Confirm { request, .. } => f
                .debug_struct("Confirm")
                .field("request", request)
                .finish_non_exhaustive(),
        }
    }
}

impl std::fmt::Debug for NotifyOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotifyOperation::Show { notice, .. } => f
                .debug_struct("Show")
                .field("notice", notice)
                .finish_non_exhaustive(),
        }
    }
}

impl std::fmt::Debug for RouterOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouterOperation::Navigate { path, .. } => f
                .debug_struct("Navigate")
                .field("path", path)
                .finish_non_exhaustive(),
        }
    }
}

impl<Action> std::fmt::Debug for AuthOperation<Action> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthOperation::SignOut { .. } => {
                f.debug_struct("SignOut").finish_non_exhaustive()
            }
        }
    }
}

impl<Action> Effect<Action> {
    /// Combine effects to run in parallel
    #[must_use]
    pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
        Effect::Parallel(effects)
    }

    /// Chain effects to run sequentially
    #[must_use]
    pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
        Effect::Sequential(effects)
    }
}
