//! Pure state transitions for the live events table.

use crate::events::actions::EventsAction;
use crate::events::environment::EventsEnvironment;
use crate::events::types::{ColumnSort, EventRecord, EventsState, LoadPhase};
use crate::events::view;
use marquee_core::notify::Severity;
use marquee_core::reducer::Reducer;
use marquee_core::{Effect, SmallVec, confirm, delete_record, navigate, notify, smallvec};

/// Reducer for [`EventsState`].
///
/// Snapshots replace the listing wholesale and every row-level flow keys
/// off record ids, so a push landing mid-flow can at worst make a delete
/// target vanish, never shift it onto a different row. Deletion itself
/// leaves the listing alone: the store confirms by pushing a snapshot
/// without the record, and that snapshot is the removal.
#[derive(Clone, Copy, Debug, Default)]
pub struct EventsReducer;

impl EventsReducer {
    /// Create an events reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for EventsReducer {
    type State = EventsState;
    type Action = EventsAction;
    type Environment = EventsEnvironment;

    fn reduce(
        &self,
        state: &mut EventsState,
        action: EventsAction,
        env: &EventsEnvironment,
    ) -> SmallVec<[Effect<EventsAction>; 4]> {
        match action {
            EventsAction::SnapshotArrived { snapshot } => {
                state.records = snapshot
                    .documents
                    .into_iter()
                    .map(EventRecord::from_document)
                    .collect();
                state.phase = LoadPhase::Populated;
                state.feed_error = None;
                state.last_synced_at = Some(env.clock.now());
                let filtered_len = view::filtered(&state.records, &state.view).len();
                state.view.clamp_page(filtered_len);
                smallvec![]
            }

            EventsAction::SubscriptionFailed { error } => {
                // The last listing stays on screen, frozen.
                state.phase = LoadPhase::Error;
                state.feed_error = Some(error.clone());
                smallvec![notify! {
                    notifier: env.notifier,
                    severity: Severity::Error,
                    title: "Error fetching events",
                    message: error
                }]
            }

            EventsAction::FilterChanged { filter } => {
                state.view.filter = filter;
                let filtered_len = view::filtered(&state.records, &state.view).len();
                state.view.clamp_page(filtered_len);
                smallvec![]
            }

            EventsAction::SortToggled { column } => {
                state.view.sort = ColumnSort::cycle(state.view.sort, column);
                smallvec![]
            }

            EventsAction::NextPageRequested => {
                let filtered_len = view::filtered(&state.records, &state.view).len();
                if state.view.page + 1 < state.view.page_count(filtered_len) {
                    state.view.page += 1;
                }
                smallvec![]
            }

            EventsAction::PreviousPageRequested => {
                state.view.page = state.view.page.saturating_sub(1);
                smallvec![]
            }

            EventsAction::PageRequested { page } => {
                state.view.page = page;
                let filtered_len = view::filtered(&state.records, &state.view).len();
                state.view.clamp_page(filtered_len);
                smallvec![]
            }

            EventsAction::DeleteRequested { id } => {
                let Some(record) = state.records.iter().find(|record| record.id == id) else {
                    // The row vanished between render and click. Nothing to
                    // confirm.
                    return smallvec![];
                };
                let title = record.title.clone();
                smallvec![confirm! {
                    confirmer: env.confirmer,
                    title: "Delete Event",
                    message: format!("Are you sure want to delete {title} ?"),
                    on_response: |response| Some(EventsAction::DeleteConfirmed {
                        id,
                        confirmed: response.confirmed,
                    })
                }]
            }

            EventsAction::DeleteConfirmed { id, confirmed } => {
                if !confirmed {
                    return smallvec![];
                }
                let Some(record) = state.records.iter().find(|record| record.id == id) else {
                    // A snapshot overtook the dialog and the row is gone.
                    return smallvec![];
                };
                let title = record.title.clone();
                let failed_id = id.clone();
                smallvec![delete_record! {
                    store: env.records,
                    collection: env.collection.clone(),
                    id: id.clone(),
                    on_success: || Some(EventsAction::DeleteSucceeded { id, title }),
                    on_error: |error| Some(EventsAction::DeleteFailed {
                        id: failed_id,
                        error,
                    })
                }]
            }

            EventsAction::DeleteSucceeded { id: _, title } => {
                smallvec![notify! {
                    notifier: env.notifier,
                    severity: Severity::Success,
                    title: "Event Deleted",
                    message: format!("{title} deleted successfully")
                }]
            }

            EventsAction::DeleteFailed { id: _, error } => {
                smallvec![notify! {
                    notifier: env.notifier,
                    severity: Severity::Error,
                    title: "Error",
                    message: error.to_string()
                }]
            }

            EventsAction::CreateRequested => {
                smallvec![navigate! {
                    router: env.router,
                    to: env.paths.create.clone()
                }]
            }

            EventsAction::UpdateRequested { id } => {
                smallvec![navigate! {
                    router: env.router,
                    to: env.paths.update.join(id.as_str())
                }]
            }
        }
    }
}
