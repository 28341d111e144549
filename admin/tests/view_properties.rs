//! Property tests for the derived events view
//!
//! The paging invariant and the filter and sort contracts have to hold for
//! every snapshot and every operator action sequence, not just the fixtures
//! in the unit tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use marquee_admin::events::{
    ColumnSort, EventRecord, EventRoutes, EventsAction, EventsEnvironment, EventsReducer,
    EventsState, SortColumn, ViewState, view,
};
use marquee_core::collection::CollectionName;
use marquee_core::reducer::Reducer;
use marquee_core::routing::RoutePath;
use marquee_testing::properties::snapshot_strategy;
use marquee_testing::{
    InMemoryCollectionStore, RecordingNotifier, RecordingRouter, ScriptedConfirmer, test_clock,
};
use proptest::prelude::*;
use std::sync::Arc;

fn test_env() -> EventsEnvironment {
    EventsEnvironment::new(
        Arc::new(InMemoryCollectionStore::new()),
        CollectionName::new("events"),
        Arc::new(ScriptedConfirmer::new()),
        Arc::new(RecordingNotifier::new()),
        Arc::new(RecordingRouter::new()),
        Arc::new(test_clock()),
        EventRoutes::new(
            RoutePath::new("/admin/events/create"),
            RoutePath::new("/admin/events/update"),
        ),
    )
}

fn arb_column() -> impl Strategy<Value = SortColumn> {
    prop_oneof![
        Just(SortColumn::Title),
        Just(SortColumn::Location),
        Just(SortColumn::Date),
    ]
}

/// Any action an operator (or the feed) can interleave with the view:
/// filters, sort toggles, page moves, and fresh snapshots.
fn arb_view_action() -> impl Strategy<Value = EventsAction> {
    prop_oneof![
        "[a-zA-Z ]{0,8}".prop_map(|filter| EventsAction::FilterChanged { filter }),
        arb_column().prop_map(|column| EventsAction::SortToggled { column }),
        Just(EventsAction::NextPageRequested),
        Just(EventsAction::PreviousPageRequested),
        (0usize..40).prop_map(|page| EventsAction::PageRequested { page }),
        snapshot_strategy(40).prop_map(|snapshot| EventsAction::SnapshotArrived { snapshot }),
    ]
}

proptest! {
    #[test]
    fn page_never_escapes_the_listing(
        snapshot in snapshot_strategy(40),
        actions in prop::collection::vec(arb_view_action(), 0..12),
    ) {
        let reducer = EventsReducer::new();
        let env = test_env();
        let mut state = EventsState::new(ViewState::new(5, true));

        let _ = reducer.reduce(
            &mut state,
            EventsAction::SnapshotArrived { snapshot },
            &env,
        );

        for action in actions {
            let _ = reducer.reduce(&mut state, action, &env);

            let filtered_len = view::filtered(&state.records, &state.view).len();
            let pages = state.view.page_count(filtered_len);
            prop_assert!(
                state.view.page == 0 || state.view.page < pages,
                "page {} outside {} pages ({} matching)",
                state.view.page,
                pages,
                filtered_len,
            );
        }
    }

    #[test]
    fn filtered_rows_keep_feed_order(
        snapshot in snapshot_strategy(30),
        filter in "[a-zA-Z ]{0,6}",
    ) {
        let records: Vec<EventRecord> = snapshot
            .documents
            .into_iter()
            .map(EventRecord::from_document)
            .collect();
        let view_state = ViewState { filter, ..ViewState::default() };

        let filtered = view::filtered(&records, &view_state);

        // Every surviving record appears in the feed, in feed order: each
        // lookup resumes where the previous one left off.
        let mut feed = records.iter();
        for kept in &filtered {
            prop_assert!(feed.any(|record| record.id == kept.id));
        }
    }

    #[test]
    fn sorting_permutes_without_loss(
        snapshot in snapshot_strategy(30),
        column in arb_column(),
    ) {
        let records: Vec<EventRecord> = snapshot
            .documents
            .into_iter()
            .map(EventRecord::from_document)
            .collect();
        let view_state = ViewState {
            sort: Some(ColumnSort::ascending(column)),
            ..ViewState::default()
        };

        let sorted = view::filtered(&records, &view_state);
        prop_assert_eq!(sorted.len(), records.len());

        let mut sorted_ids: Vec<&str> = sorted.iter().map(|record| record.id.as_str()).collect();
        let mut feed_ids: Vec<&str> = records.iter().map(|record| record.id.as_str()).collect();
        sorted_ids.sort_unstable();
        feed_ids.sort_unstable();
        prop_assert_eq!(sorted_ids, feed_ids);
    }
}
