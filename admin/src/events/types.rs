//! Events table state: the mirrored records and the operator's view.

use marquee_core::collection::{Document, RecordId};
use marquee_core::{DateTime, Deserialize, Serialize, Utc};

/// Character budget for the details preview column.
pub const DETAILS_PREVIEW_CHARS: usize = 30;

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One event as mirrored from the record feed.
///
/// Text fields the feed omits decode as empty rather than failing: the
/// feed is authoritative and the table renders what it got. Fields the
/// view does not model ride along in `extra` untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Store-assigned record id
    pub id: RecordId,
    /// Event title
    #[serde(default)]
    pub title: String,
    /// Long description, never filtered on
    #[serde(default)]
    pub details: String,
    /// Image references, never filtered on
    #[serde(default)]
    pub images: Vec<String>,
    /// Venue, when the record carries one
    #[serde(default)]
    pub location: Option<String>,
    /// Date text, when the record carries one
    #[serde(default)]
    pub date: Option<String>,
    /// Fields this view does not model
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl EventRecord {
    /// Decode one feed document.
    #[must_use]
    pub fn from_document(document: Document) -> Self {
        let Document { id, mut fields } = document;

        let title = take_text(&mut fields, "title").unwrap_or_default();
        let details = take_text(&mut fields, "details").unwrap_or_default();
        let images = take_text_list(&mut fields, "images");
        let location = take_text(&mut fields, "location");
        let date = take_text(&mut fields, "date");

        Self {
            id,
            title,
            details,
            images,
            location,
            date,
            extra: fields,
        }
    }

    /// Details clipped to [`DETAILS_PREVIEW_CHARS`] characters, marked with
    /// `...` when something was cut. Clipping counts characters, so
    /// multi-byte text never splits.
    #[must_use]
    pub fn details_preview(&self) -> String {
        match self.details.char_indices().nth(DETAILS_PREVIEW_CHARS) {
            Some((cut, _)) => format!("{}...", &self.details[..cut]),
            None => self.details.clone(),
        }
    }
}

/// Remove `name` from `fields` when it holds text. A value of another
/// shape stays in the map so it remains visible in `extra`.
fn take_text(
    fields: &mut serde_json::Map<String, serde_json::Value>,
    name: &str,
) -> Option<String> {
    match fields.remove(name) {
        Some(serde_json::Value::String(text)) => Some(text),
        Some(other) => {
            fields.insert(name.to_string(), other);
            None
        }
        None => None,
    }
}

/// Remove `name` from `fields` when it holds a text array, keeping only
/// its text items.
fn take_text_list(
    fields: &mut serde_json::Map<String, serde_json::Value>,
    name: &str,
) -> Vec<String> {
    match fields.remove(name) {
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(text) => Some(text),
                _ => None,
            })
            .collect(),
        Some(other) => {
            fields.insert(name.to_string(), other);
            Vec::new()
        }
        None => Vec::new(),
    }
}

/// Lifecycle of the mirror.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadPhase {
    /// Subscription requested, nothing arrived yet
    #[default]
    Loading,
    /// At least one snapshot arrived; records mirror the feed
    Populated,
    /// The feed broke; records stay frozen at the last snapshot
    Error,
}

/// Column the operator can sort the table by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortColumn {
    /// Event title
    Title,
    /// Venue
    Location,
    /// Date text
    Date,
}

/// Direction of a column sort.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    /// A before Z
    Ascending,
    /// Z before A
    Descending,
}

/// An explicit sort directive: one column, one direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnSort {
    /// Column the rows order by
    pub column: SortColumn,
    /// Direction applied to that column
    pub direction: SortDirection,
}

impl ColumnSort {
    /// Ascending sort on `column`.
    #[must_use]
    pub const fn ascending(column: SortColumn) -> Self {
        Self {
            column,
            direction: SortDirection::Ascending,
        }
    }

    /// Next directive after toggling `column` against `current`.
    ///
    /// Each column cycles unsorted, ascending, descending and back to
    /// unsorted. Toggling a different column starts that column ascending.
    #[must_use]
    pub fn cycle(current: Option<Self>, column: SortColumn) -> Option<Self> {
        match current {
            Some(sort) if sort.column == column => match sort.direction {
                SortDirection::Ascending => Some(Self {
                    column,
                    direction: SortDirection::Descending,
                }),
                SortDirection::Descending => None,
            },
            _ => Some(Self::ascending(column)),
        }
    }
}

/// Operator-controlled view parameters: filter, sort and page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    /// Substring filter over title, location and date
    pub filter: String,
    /// Explicit sort directive; `None` keeps the feed's order
    pub sort: Option<ColumnSort>,
    /// Current page, zero based
    pub page: usize,
    /// Rows per page
    pub page_size: usize,
    /// Whether the filter ignores case
    pub case_insensitive: bool,
}

impl ViewState {
    /// Unfiltered, unsorted view on the first page.
    #[must_use]
    pub const fn new(page_size: usize, case_insensitive: bool) -> Self {
        Self {
            filter: String::new(),
            sort: None,
            page: 0,
            page_size,
            case_insensitive,
        }
    }

    /// Number of pages `filtered_len` rows spread over.
    #[must_use]
    pub const fn page_count(&self, filtered_len: usize) -> usize {
        if self.page_size == 0 {
            0
        } else {
            filtered_len.div_ceil(self.page_size)
        }
    }

    /// Clamp the page into range for `filtered_len` rows.
    ///
    /// An empty listing pins the page to zero. Otherwise the page stays
    /// where it was unless it fell past the end, in which case it lands on
    /// the last page.
    pub const fn clamp_page(&mut self, filtered_len: usize) {
        let pages = self.page_count(filtered_len);
        if pages == 0 {
            self.page = 0;
        } else if self.page >= pages {
            self.page = pages - 1;
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, true)
    }
}

/// Events table state: the mirror plus the operator's view parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct EventsState {
    /// Where the mirror is in its lifecycle
    pub phase: LoadPhase,
    /// Records exactly as the last snapshot listed them
    pub records: Vec<EventRecord>,
    /// Operator-controlled view parameters
    pub view: ViewState,
    /// When the last snapshot arrived
    pub last_synced_at: Option<DateTime<Utc>>,
    /// Message of the feed failure that froze the mirror
    pub feed_error: Option<String>,
}

impl EventsState {
    /// Loading mirror with no records and this view.
    #[must_use]
    pub const fn new(view: ViewState) -> Self {
        Self {
            phase: LoadPhase::Loading,
            records: Vec::new(),
            view,
            last_synced_at: None,
            feed_error: None,
        }
    }
}

impl Default for EventsState {
    fn default() -> Self {
        Self::new(ViewState::default())
    }
}
