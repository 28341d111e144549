//! Actions processed by the events reducer.

use crate::events::types::SortColumn;
use marquee_core::collection::{CollectionError, RecordId, Snapshot};

/// Everything that can happen to the events table.
///
/// Feed actions come from the store's consumer; the rest are operator
/// intents. Deletion is spread over four actions because every step runs
/// through the runtime: request, dialog answer, then the store's verdict.
#[derive(Clone, Debug, PartialEq)]
pub enum EventsAction {
    /// The feed shipped a complete listing
    SnapshotArrived {
        /// The listing, replacing the mirror wholesale
        snapshot: Snapshot,
    },

    /// The feed broke; the mirror freezes at its last records
    SubscriptionFailed {
        /// Store-reported reason
        error: String,
    },

    /// The operator edited the text filter
    FilterChanged {
        /// New filter text, matched as a substring
        filter: String,
    },

    /// The operator toggled a column's sort
    SortToggled {
        /// The toggled column
        column: SortColumn,
    },

    /// The operator moved one page forward
    NextPageRequested,

    /// The operator moved one page back
    PreviousPageRequested,

    /// The operator jumped to a page
    PageRequested {
        /// Requested page, zero based, clamped into range
        page: usize,
    },

    /// The operator asked to delete a record
    DeleteRequested {
        /// Id of the record behind the pressed row
        id: RecordId,
    },

    /// The confirmation dialog answered
    DeleteConfirmed {
        /// Record the dialog was about
        id: RecordId,
        /// Whether the operator confirmed
        confirmed: bool,
    },

    /// The remote store accepted the deletion
    DeleteSucceeded {
        /// Deleted record id
        id: RecordId,
        /// Title at the time the deletion was issued
        title: String,
    },

    /// The remote store rejected the deletion
    DeleteFailed {
        /// Record the deletion was about
        id: RecordId,
        /// The store's verdict
        error: CollectionError,
    },

    /// The operator asked for the creation form
    CreateRequested,

    /// The operator asked for a record's update form
    UpdateRequested {
        /// Record to edit
        id: RecordId,
    },
}
