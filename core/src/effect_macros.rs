//! Declarative macros for ergonomic effect construction
//!
//! These macros reduce boilerplate when creating `Effect` variants for the
//! collaborator operations (dialogs, collection mutations, notices,
//! navigation, sign-out).

/// Create an `Effect::Dialog` with a `Confirm` operation
///
/// # Example
///
/// ```rust,ignore
/// use marquee_core::confirm;
///
/// confirm! {
///     confirmer: env.confirmer,
///     title: "Delete Event",
///     message: format!("Are you sure want to delete {title} ?"),
///     on_response: |response| {
///         if response.confirmed {
///             Some(EventsAction::DeleteConfirmed { id, title })
///         } else {
///             None
///         }
///     }
/// }
/// ```
#[macro_export]
macro_rules! confirm {
    (
        confirmer: $confirmer:expr,
        title: $title:expr,
        message: $message:expr,
        on_response: |$response_param:ident| $response_body:expr
    ) => {
        $crate::effect::Effect::Dialog($crate::effect::DialogOperation::Confirm {
            confirmer: ::std::sync::Arc::clone(&$confirmer),
            request: $crate::dialog::ConfirmRequest::new($title, $message),
            on_response: ::std::boxed::Box::new(move |$response_param| $response_body),
        })
    };
}

/// Create an `Effect::Collection` with a `DeleteRecord` operation
///
/// # Example
///
/// ```rust,ignore
/// use marquee_core::delete_record;
///
/// delete_record! {
///     store: env.collection_store,
///     collection: env.collection.clone(),
///     id: record_id,
///     on_success: || Some(EventsAction::DeleteSucceeded { id, title }),
///     on_error: |error| Some(EventsAction::DeleteFailed { error: error.to_string() })
/// }
/// ```
#[macro_export]
macro_rules! delete_record {
    (
        store: $store:expr,
        collection: $collection:expr,
        id: $id:expr,
        on_success: || $success_body:expr,
        on_error: |$error_param:ident| $error_body:expr
    ) => {
        $crate::effect::Effect::Collection($crate::effect::CollectionOperation::DeleteRecord {
            store: ::std::sync::Arc::clone(&$store),
            collection: $collection,
            id: $id,
            on_success: ::std::boxed::Box::new(move |()| $success_body),
            on_error: ::std::boxed::Box::new(move |$error_param| $error_body),
        })
    };
}

/// Create an `Effect::Notify` operation
///
/// # Example
///
/// ```rust,ignore
/// use marquee_core::notify;
/// use marquee_core::notify::Severity;
///
/// notify! {
///     notifier: env.notifier,
///     severity: Severity::Success,
///     title: "Event Deleted",
///     message: format!("{title} deleted successfully")
/// }
/// ```
#[macro_export]
macro_rules! notify {
    (
        notifier: $notifier:expr,
        severity: $severity:expr,
        title: $title:expr,
        message: $message:expr
    ) => {
        $crate::effect::Effect::Notify($crate::effect::NotifyOperation::Show {
            notifier: ::std::sync::Arc::clone(&$notifier),
            notice: $crate::notify::Notice::new($severity, $title, $message),
        })
    };
}

/// Create an `Effect::Navigate` operation
///
/// # Example
///
/// ```rust,ignore
/// use marquee_core::navigate;
///
/// navigate! {
///     router: env.router,
///     to: env.paths.event_update.join(id.as_str())
/// }
/// ```
#[macro_export]
macro_rules! navigate {
    (
        router: $router:expr,
        to: $path:expr
    ) => {
        $crate::effect::Effect::Navigate($crate::effect::RouterOperation::Navigate {
            router: ::std::sync::Arc::clone(&$router),
            path: $path,
        })
    };
}

/// Create an `Effect::Auth` with a `SignOut` operation
///
/// # Example
///
/// ```rust,ignore
/// use marquee_core::sign_out;
///
/// sign_out! {
///     gateway: env.auth,
///     on_success: || Some(SessionAction::SignOutSucceeded),
///     on_error: |error| Some(SessionAction::SignOutFailed { error: error.to_string() })
/// }
/// ```
#[macro_export]
macro_rules! sign_out {
    (
        gateway: $gateway:expr,
        on_success: || $success_body:expr,
        on_error: |$error_param:ident| $error_body:expr
    ) => {
        $crate::effect::Effect::Auth($crate::effect::AuthOperation::SignOut {
            gateway: ::std::sync::Arc::clone(&$gateway),
            on_success: ::std::boxed::Box::new(move |()| $success_body),
            on_error: ::std::boxed::Box::new(move |$error_param| $error_body),
        })
    };
}

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use marquee_core::async_effect;
///
/// async_effect! {
///     let snapshot = store.subscribe(query).await?;
///     Some(EventsAction::SnapshotArrived { snapshot })
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create an `Effect::Delay` for scheduling delayed actions
///
/// # Example
///
/// ```rust,ignore
/// use marquee_core::delay;
/// use std::time::Duration;
///
/// delay! {
///     duration: Duration::from_secs(5),
///     action: EventsAction::BannerExpired
/// }
/// ```
#[macro_export]
macro_rules! delay {
    (
        duration: $duration:expr,
        action: $action:expr
    ) => {
        $crate::effect::Effect::Delay {
            duration: $duration,
            action: ::std::boxed::Box::new($action),
        }
    };
}
