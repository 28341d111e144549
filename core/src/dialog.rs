//! Confirmation dialog abstraction.
//!
//! Confirmation is modeled as a single-shot request/response exchange: the
//! reducer describes the question as a value, the runtime presents it, and
//! exactly one [`Confirmation`] comes back. There is no shared mutable dialog
//! state, and dismissing the dialog counts as declining.

use std::future::Future;
use std::pin::Pin;

/// The question to put to the operator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmRequest {
    /// Dialog title
    pub title: String,
    /// Dialog body text
    pub message: String,
}

impl ConfirmRequest {
    /// Create a confirm request.
    #[must_use]
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// The operator's answer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Confirmation {
    /// True when the operator explicitly confirmed
    pub confirmed: bool,
}

impl Confirmation {
    /// An explicit yes.
    #[must_use]
    pub const fn confirmed() -> Self {
        Self { confirmed: true }
    }

    /// A decline, including dismissing the dialog.
    #[must_use]
    pub const fn declined() -> Self {
        Self { confirmed: false }
    }
}

/// Presents confirm dialogs.
///
/// # Dyn Compatibility
///
/// Explicit `Pin<Box<dyn Future>>` returns keep the trait usable as
/// `Arc<dyn Confirmer>` inside effects.
pub trait Confirmer: Send + Sync {
    /// Present `request` and resolve with the operator's answer.
    ///
    /// Infallible: a presenter that cannot show the dialog resolves as
    /// declined rather than inventing an error channel.
    fn confirm(
        &self,
        request: ConfirmRequest,
    ) -> Pin<Box<dyn Future<Output = Confirmation> + Send + '_>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_constructors() {
        assert!(Confirmation::confirmed().confirmed);
        assert!(!Confirmation::declined().confirmed);
    }

    #[test]
    fn request_holds_texts() {
        let request = ConfirmRequest::new("Delete Event", "Are you sure?");
        assert_eq!(request.title, "Delete Event");
        assert_eq!(request.message, "Are you sure?");
    }
}
