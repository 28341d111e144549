//! Derived table view: filter, sort and paginate the mirrored records.
//!
//! Everything here is a pure function of [`EventsState`]. The mirror is
//! never reordered or trimmed in place; hosts call [`table_view`] whenever
//! they render and get the rows for the current page.

use crate::events::types::{
    ColumnSort, EventRecord, EventsState, LoadPhase, SortColumn, SortDirection, ViewState,
};
use marquee_core::collection::RecordId;

/// Placeholder row while the first snapshot is on its way.
pub const LOADING_ROW: &str = "Fetching Events...";

/// Placeholder row for an empty or fully filtered-out listing.
pub const EMPTY_ROW: &str = "No events found. Currently, there are no scheduled events or \
     activities. Please check back later or consider creating new events.";

/// One rendered table row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventRow {
    /// Position across the whole filtered listing, starting at 1
    pub ordinal: usize,
    /// Record id the row's actions address
    pub id: RecordId,
    /// Event title
    pub title: String,
    /// Clipped details
    pub details_preview: String,
    /// Venue, when the record carries one
    pub location: Option<String>,
    /// Date text, when the record carries one
    pub date: Option<String>,
    /// Image references
    pub images: Vec<String>,
}

/// Body of the rendered table: rows, or one full-width placeholder line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableBody {
    /// One full-width placeholder line
    Placeholder(String),
    /// The current page's rows
    Rows(Vec<EventRow>),
}

/// The rendered table for one state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableView {
    /// Rows or placeholder
    pub body: TableBody,
    /// Current page, zero based
    pub page: usize,
    /// Total pages across the filtered listing
    pub page_count: usize,
    /// Rows across the whole filtered listing
    pub filtered_len: usize,
    /// Sort directive the rows follow
    pub sort: Option<ColumnSort>,
}

/// Records that pass the view's filter, sorted per its directive.
///
/// The filter matches title, venue and date only; details and images never
/// participate. Without a directive the feed's order is kept as is, and
/// the sort is stable, so records with equal keys keep their feed order.
/// Records missing the sorted field order first ascending.
#[must_use]
pub fn filtered<'a>(records: &'a [EventRecord], view: &ViewState) -> Vec<&'a EventRecord> {
    let needle = if view.case_insensitive {
        view.filter.to_lowercase()
    } else {
        view.filter.clone()
    };

    let mut rows: Vec<&EventRecord> = records
        .iter()
        .filter(|record| matches_filter(record, &needle, view.case_insensitive))
        .collect();

    if let Some(sort) = view.sort {
        rows.sort_by(|a, b| {
            let ordering = match sort.column {
                SortColumn::Title => a.title.cmp(&b.title),
                SortColumn::Location => a.location.cmp(&b.location),
                SortColumn::Date => a.date.cmp(&b.date),
            };
            match sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    rows
}

fn matches_filter(record: &EventRecord, needle: &str, case_insensitive: bool) -> bool {
    if needle.is_empty() {
        return true;
    }

    let haystacks = [
        Some(record.title.as_str()),
        record.location.as_deref(),
        record.date.as_deref(),
    ];
    haystacks.into_iter().flatten().any(|haystack| {
        if case_insensitive {
            haystack.to_lowercase().contains(needle)
        } else {
            haystack.contains(needle)
        }
    })
}

/// Render the table for `state`.
///
/// While loading the table shows [`LOADING_ROW`] whatever the mirror
/// holds; an empty filtered listing shows [`EMPTY_ROW`] on page zero of
/// zero. Ordinals continue across pages, so the first row of page one at
/// ten rows per page reads 11.
#[must_use]
pub fn table_view(state: &EventsState) -> TableView {
    if state.phase == LoadPhase::Loading {
        return TableView {
            body: TableBody::Placeholder(LOADING_ROW.to_string()),
            page: state.view.page,
            page_count: 0,
            filtered_len: 0,
            sort: state.view.sort,
        };
    }

    let rows = filtered(&state.records, &state.view);
    let filtered_len = rows.len();
    let page_count = state.view.page_count(filtered_len);

    if filtered_len == 0 {
        return TableView {
            body: TableBody::Placeholder(EMPTY_ROW.to_string()),
            page: 0,
            page_count: 0,
            filtered_len: 0,
            sort: state.view.sort,
        };
    }

    let offset = state.view.page * state.view.page_size;
    let page_rows = rows
        .into_iter()
        .enumerate()
        .skip(offset)
        .take(state.view.page_size)
        .map(|(index, record)| EventRow {
            ordinal: index + 1,
            id: record.id.clone(),
            title: record.title.clone(),
            details_preview: record.details_preview(),
            location: record.location.clone(),
            date: record.date.clone(),
            images: record.images.clone(),
        })
        .collect();

    TableView {
        body: TableBody::Rows(page_rows),
        page: state.view.page,
        page_count,
        filtered_len,
        sort: state.view.sort,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_testing::helpers::document;
    use serde_json::json;

    fn record(id: &str, title: &str, location: Option<&str>, date: Option<&str>) -> EventRecord {
        let mut fields = vec![("title", json!(title))];
        if let Some(location) = location {
            fields.push(("location", json!(location)));
        }
        if let Some(date) = date {
            fields.push(("date", json!(date)));
        }
        EventRecord::from_document(document(id, fields))
    }

    fn populated(records: Vec<EventRecord>, view: ViewState) -> EventsState {
        let mut state = EventsState::new(view);
        state.phase = LoadPhase::Populated;
        state.records = records;
        state
    }

    #[allow(clippy::panic)] // Test assertion
    fn row_titles(view: &TableView) -> Vec<String> {
        match &view.body {
            TableBody::Rows(rows) => rows.iter().map(|row| row.title.clone()).collect(),
            TableBody::Placeholder(text) => panic!("expected rows, got placeholder {text:?}"),
        }
    }

    #[test]
    fn loading_shows_the_fetching_row() {
        let state = EventsState::default();

        let table = table_view(&state);

        assert_eq!(table.body, TableBody::Placeholder(LOADING_ROW.to_string()));
        assert_eq!(table.page_count, 0);
    }

    #[test]
    fn empty_listing_shows_the_empty_row() {
        let state = populated(Vec::new(), ViewState::default());

        let table = table_view(&state);

        assert_eq!(table.body, TableBody::Placeholder(EMPTY_ROW.to_string()));
        assert_eq!(table.page, 0);
        assert_eq!(table.page_count, 0);
    }

    #[test]
    fn fully_filtered_out_listing_shows_the_empty_row() {
        let view = ViewState {
            filter: "zzz".to_string(),
            ..ViewState::default()
        };
        let state = populated(vec![record("e1", "Ballet Night", None, None)], view);

        let table = table_view(&state);

        assert_eq!(table.body, TableBody::Placeholder(EMPTY_ROW.to_string()));
        assert_eq!(table.filtered_len, 0);
    }

    #[test]
    fn filter_matches_title_venue_and_date_only() {
        let mut matching_details = record("e2", "Jazz Brunch", None, None);
        matching_details.details = "ballet mentioned here".to_string();

        let records = vec![
            record("e1", "Ballet Night", None, None),
            matching_details,
            record("e3", "Open Stage", Some("Ballet Hall"), None),
            record("e4", "Quiet Evening", None, Some("ballet-season")),
        ];
        let view = ViewState {
            filter: "Ballet".to_string(),
            ..ViewState::default()
        };

        let rows = filtered(&records, &view);
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();

        assert_eq!(ids, vec!["e1", "e3", "e4"]);
    }

    #[test]
    fn case_sensitive_filter_respects_case() {
        let records = vec![
            record("e1", "Ballet Night", None, None),
            record("e2", "ballet rehearsal", None, None),
        ];
        let mut view = ViewState::new(10, false);
        view.filter = "Ballet".to_string();

        let rows = filtered(&records, &view);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id.as_str(), "e1");
    }

    #[test]
    fn unsorted_view_keeps_the_feed_order() {
        let records = vec![
            record("e1", "Zebra Crossing", None, None),
            record("e2", "Aria Evening", None, None),
        ];
        let state = populated(records, ViewState::default());

        assert_eq!(
            row_titles(&table_view(&state)),
            vec!["Zebra Crossing", "Aria Evening"]
        );
    }

    #[test]
    fn descending_sort_reverses_the_column() {
        let records = vec![
            record("e1", "Aria Evening", None, None),
            record("e2", "Zebra Crossing", None, None),
            record("e3", "Matinee", None, None),
        ];
        let view = ViewState {
            sort: Some(ColumnSort {
                column: SortColumn::Title,
                direction: SortDirection::Descending,
            }),
            ..ViewState::default()
        };
        let state = populated(records, view);

        assert_eq!(
            row_titles(&table_view(&state)),
            vec!["Zebra Crossing", "Matinee", "Aria Evening"]
        );
    }

    #[test]
    fn equal_sort_keys_keep_their_feed_order() {
        let records = vec![
            record("e1", "First Booked", Some("Grand Hall"), None),
            record("e2", "Second Booked", Some("Grand Hall"), None),
            record("e3", "Annex Show", Some("Annex"), None),
        ];
        let view = ViewState {
            sort: Some(ColumnSort::ascending(SortColumn::Location)),
            ..ViewState::default()
        };
        let state = populated(records, view);

        assert_eq!(
            row_titles(&table_view(&state)),
            vec!["Annex Show", "First Booked", "Second Booked"]
        );
    }

    #[test]
    fn ordinals_continue_across_pages() {
        let records: Vec<EventRecord> = (1..=15)
            .map(|n| record(&format!("e{n}"), &format!("Event {n}"), None, None))
            .collect();
        let view = ViewState {
            page: 1,
            ..ViewState::default()
        };
        let state = populated(records, view);

        let table = table_view(&state);
        #[allow(clippy::panic)] // Test assertion
        let TableBody::Rows(rows) = &table.body else {
            panic!("expected rows");
        };

        assert_eq!(table.page_count, 2);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].ordinal, 11);
        assert_eq!(rows[4].ordinal, 15);
    }
}
