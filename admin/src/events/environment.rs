//! Dependencies injected into the events reducer.

use marquee_core::collection::{CollectionName, CollectionStore};
use marquee_core::dialog::Confirmer;
use marquee_core::environment::Clock;
use marquee_core::notify::Notifier;
use marquee_core::routing::{RoutePath, Router};
use std::sync::Arc;

/// Route targets the events table navigates to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventRoutes {
    /// Creation form
    pub create: RoutePath,
    /// Update form base; the record id is appended
    pub update: RoutePath,
}

impl EventRoutes {
    /// Bundle the two form routes.
    #[must_use]
    pub const fn new(create: RoutePath, update: RoutePath) -> Self {
        Self { create, update }
    }
}

/// Collaborators the events reducer reaches through effects.
#[derive(Clone)]
pub struct EventsEnvironment {
    /// Remote store deletions go to
    pub records: Arc<dyn CollectionStore>,
    /// Collection the table mirrors
    pub collection: CollectionName,
    /// Dialog that confirms deletions
    pub confirmer: Arc<dyn Confirmer>,
    /// Channel operator notices go out on
    pub notifier: Arc<dyn Notifier>,
    /// Router create and update requests navigate through
    pub router: Arc<dyn Router>,
    /// Clock stamping snapshot arrivals
    pub clock: Arc<dyn Clock>,
    /// Route targets for the two forms
    pub paths: EventRoutes,
}

impl EventsEnvironment {
    /// Bundle the events collaborators.
    #[must_use]
    pub fn new(
        records: Arc<dyn CollectionStore>,
        collection: CollectionName,
        confirmer: Arc<dyn Confirmer>,
        notifier: Arc<dyn Notifier>,
        router: Arc<dyn Router>,
        clock: Arc<dyn Clock>,
        paths: EventRoutes,
    ) -> Self {
        Self {
            records,
            collection,
            confirmer,
            notifier,
            router,
            clock,
            paths,
        }
    }
}
