//! Auth gateway abstraction: session change stream and sign-out.
//!
//! The gateway owns authentication. Marquee only observes: it subscribes to
//! auth-state changes, keeps session state in step, and asks the gateway to
//! sign out. Sign-in itself happens on screens outside this engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// What a signed-in principal may do.
///
/// The upstream encoding is numeric; `1` means admin and anything else a
/// regular user. [`Role::Guest`] is local only — it is the absence of a
/// session and never crosses the gateway boundary.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// No session
    #[default]
    Guest,
    /// Signed in without admin rights
    User,
    /// Signed in with admin rights
    Admin,
}

impl Role {
    /// Decode the gateway's numeric role code.
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            1 => Role::Admin,
            _ => Role::User,
        }
    }

    /// Whether this role grants admin screens.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Guest => write!(f, "guest"),
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// Opaque identifier for a signed-in user.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Create a new `UserId` from a string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the user ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the gateway knows about the signed-in user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Gateway-assigned user id
    pub user_id: UserId,
    /// Sign-in email
    pub email: String,
}

impl Credentials {
    /// Create credentials.
    #[must_use]
    pub fn new(user_id: UserId, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
        }
    }
}

/// One auth-state transition as reported by the gateway.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthStateChange {
    /// Present when a session exists
    pub credentials: Option<Credentials>,
    /// Role of the session, [`Role::Guest`] when signed out
    pub role: Role,
}

impl AuthStateChange {
    /// A signed-in transition.
    #[must_use]
    pub const fn signed_in(credentials: Credentials, role: Role) -> Self {
        Self {
            credentials: Some(credentials),
            role,
        }
    }

    /// A signed-out transition.
    #[must_use]
    pub const fn signed_out() -> Self {
        Self {
            credentials: None,
            role: Role::Guest,
        }
    }

    /// Whether this change represents an active session.
    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.credentials.is_some()
    }
}

/// Type alias for a stream of auth-state changes.
///
/// An `Err` item means the subscription broke; the stream is dead after that
/// and session state keeps its last values.
pub type AuthStream = Pin<Box<dyn futures::Stream<Item = Result<AuthStateChange, AuthError>> + Send>>;

/// Errors that can occur during auth gateway operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The auth-state subscription could not be established or broke down.
    #[error("Auth subscription failed: {0}")]
    SubscriptionFailed(String),

    /// Sign-out was rejected or did not complete.
    #[error("Sign-out failed: {0}")]
    SignOutFailed(String),

    /// Transport-level failure talking to the gateway.
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

/// Auth gateway abstraction.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to be safely used in async contexts
/// and shared across threads.
///
/// # Dyn Compatibility
///
/// Explicit `Pin<Box<dyn Future>>` returns keep the trait usable as
/// `Arc<dyn AuthGateway>` inside effects.
pub trait AuthGateway: Send + Sync {
    /// Subscribe to auth-state changes.
    ///
    /// The first item describes the current session (or its absence), so a
    /// fresh subscriber can resolve its loading state immediately.
    ///
    /// # Errors
    ///
    /// - `SubscriptionFailed`: The subscription could not be established
    /// - `ConnectionError`: Transport failure
    fn subscribe(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<AuthStream, AuthError>> + Send + '_>>;

    /// End the current session.
    ///
    /// # Errors
    ///
    /// - `SignOutFailed`: The gateway rejected the request
    /// - `ConnectionError`: Transport failure
    fn sign_out(&self) -> Pin<Box<dyn Future<Output = Result<(), AuthError>> + Send + '_>>;
}
