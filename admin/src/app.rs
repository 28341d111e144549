//! Admin console coordinator: wires the stores and manages their lifecycle.

use crate::config::AdminConfig;
use crate::error::StartError;
use crate::events::{EventRoutes, EventsEnvironment, EventsStore, ViewState};
use crate::nav::{NavEnvironment, NavStore, default_entries};
use crate::session::{SessionEnvironment, SessionHandle, SessionStore};
use marquee_core::auth::AuthGateway;
use marquee_core::collection::CollectionStore;
use marquee_core::dialog::Confirmer;
use marquee_core::environment::Clock;
use marquee_core::notify::Notifier;
use marquee_core::routing::Router;
use marquee_runtime::StoreError;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Application errors
#[derive(Error, Debug)]
pub enum AppError {
    /// A component store could not start
    #[error("Start error: {0}")]
    Start(#[from] StartError),

    /// A component store did not stop cleanly
    #[error("Shutdown error: {0}")]
    Shutdown(#[from] StoreError),
}

/// The outside world as the admin console sees it.
///
/// One bundle of collaborator handles, shared across every store. Hosts
/// build it once from their real adapters; tests build it from the doubles
/// in `marquee-testing`.
#[derive(Clone)]
pub struct Collaborators {
    /// Remote store the events table mirrors and deletes through
    pub records: Arc<dyn CollectionStore>,
    /// Authentication feed and sign-out endpoint
    pub auth: Arc<dyn AuthGateway>,
    /// Dialog presenter for delete confirmations
    pub confirmer: Arc<dyn Confirmer>,
    /// Channel operator notices go out on
    pub notifier: Arc<dyn Notifier>,
    /// Route feed and navigation sink
    pub router: Arc<dyn Router>,
    /// Clock stamping snapshot arrivals
    pub clock: Arc<dyn Clock>,
}

impl Collaborators {
    /// Bundle the collaborator handles.
    #[must_use]
    pub fn new(
        records: Arc<dyn CollectionStore>,
        auth: Arc<dyn AuthGateway>,
        confirmer: Arc<dyn Confirmer>,
        notifier: Arc<dyn Notifier>,
        router: Arc<dyn Router>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            records,
            auth,
            confirmer,
            notifier,
            router,
            clock,
        }
    }
}

/// Main admin console application.
///
/// Owns the three component stores and starts them against one shared
/// set of collaborators:
/// - Session store (auth feed mirror, sign-out flow)
/// - Events store (live collection mirror, derived table view)
/// - Nav store (route feed mirror, header projection)
pub struct AdminApp {
    session: SessionStore,
    events: EventsStore,
    nav: NavStore,
    config: AdminConfig,
}

impl AdminApp {
    /// Wire the component stores from config and collaborators.
    ///
    /// Nothing is subscribed yet; feeds go live in [`AdminApp::start`].
    #[must_use]
    pub fn new(config: AdminConfig, collaborators: &Collaborators) -> Self {
        let session = SessionStore::new(SessionEnvironment::new(
            Arc::clone(&collaborators.auth),
            Arc::clone(&collaborators.router),
            config.paths.login.clone(),
        ));

        let events = EventsStore::new(
            EventsEnvironment::new(
                Arc::clone(&collaborators.records),
                config.collection.name.clone(),
                Arc::clone(&collaborators.confirmer),
                Arc::clone(&collaborators.notifier),
                Arc::clone(&collaborators.router),
                Arc::clone(&collaborators.clock),
                EventRoutes::new(
                    config.paths.event_create.clone(),
                    config.paths.event_update.clone(),
                ),
            ),
            config.collection.order_by.clone(),
            ViewState::new(config.view.page_size, config.view.case_insensitive_filter),
        );

        let nav = NavStore::new(
            default_entries(&config.paths),
            NavEnvironment::new(
                session.handle(),
                Arc::clone(&collaborators.router),
                config.paths.login.clone(),
            ),
        );

        Self {
            session,
            events,
            nav,
            config,
        }
    }

    /// Subscribe every feed and start mirroring.
    ///
    /// The session goes first so the header never reads an unstarted
    /// session store.
    ///
    /// # Errors
    ///
    /// [`AppError::Start`] if any store's consumer is already running.
    pub async fn start(&self) -> Result<(), AppError> {
        self.session.start().await?;
        self.events.start().await?;
        self.nav.start().await?;

        tracing::info!("✓ Admin console started");
        tracing::info!("  - Session: auth feed live");
        tracing::info!("  - Events: collection feed live");
        tracing::info!("  - Nav: route feed live");

        Ok(())
    }

    /// Stop every feed consumer and drain in-flight effects.
    ///
    /// All three stores are asked to stop even when one fails; the first
    /// failure is reported after the others had their chance.
    ///
    /// # Errors
    ///
    /// [`AppError::Shutdown`] if a store still had effects running when
    /// `timeout` elapsed.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), AppError> {
        let nav = self.nav.shutdown(timeout).await;
        let events = self.events.shutdown(timeout).await;
        let session = self.session.shutdown(timeout).await;
        nav.and(events).and(session)?;

        tracing::info!("Admin console stopped");
        Ok(())
    }

    /// The operator session store.
    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// The live events table store.
    #[must_use]
    pub const fn events(&self) -> &EventsStore {
        &self.events
    }

    /// The navigation header store.
    #[must_use]
    pub const fn nav(&self) -> &NavStore {
        &self.nav
    }

    /// Cheap cloneable handle onto the live session.
    #[must_use]
    pub fn session_handle(&self) -> SessionHandle {
        self.session.handle()
    }

    /// The configuration the app was wired from.
    #[must_use]
    pub const fn config(&self) -> &AdminConfig {
        &self.config
    }
}
