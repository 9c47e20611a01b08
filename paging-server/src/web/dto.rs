//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{HasTimeBounds, ItineraryBounds, PageType, SortOrder};
use crate::paging::{CursorError, PageCursor, PagePlan};

/// Request to compute paging for a completed search.
#[derive(Debug, Deserialize)]
pub struct PlanPageRequest {
    /// Whether the search was arrive-by (ignored when `page_cursor` is set)
    #[serde(default)]
    pub arrive_by: bool,

    /// Cursor the search was run with, if it was a page request
    pub page_cursor: Option<String>,

    /// Earliest departure time actually used by the search
    pub earliest_departure_time: DateTime<Utc>,

    /// Latest arrival time used by the search
    pub latest_arrival_time: Option<DateTime<Utc>>,

    /// Search window used in seconds (defaults to the configured window)
    pub search_window_secs: Option<i64>,

    /// Maximum itineraries per page (defaults to the configured maximum)
    pub num_itineraries: Option<usize>,

    /// Itineraries found by the search, in any order
    #[serde(default)]
    pub itineraries: Vec<ItineraryRequest>,
}

/// An itinerary in a paging request.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ItineraryRequest {
    /// Departure time
    pub start_time: DateTime<Utc>,

    /// Arrival time
    pub end_time: DateTime<Utc>,
}

/// An itinerary kept on the page.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ItineraryResult {
    /// Departure time
    pub start_time: DateTime<Utc>,

    /// Arrival time
    pub end_time: DateTime<Utc>,
}

/// Response for paging computation.
#[derive(Debug, Serialize)]
pub struct PlanPageResponse {
    /// Sort order of the page
    pub sort_order: SortOrder,

    /// Itineraries kept on the page, in sort order
    pub itineraries: Vec<ItineraryResult>,

    /// Number of itineraries cropped away
    pub removed_itineraries: usize,

    /// Search window used in seconds
    pub search_window_used_secs: i64,

    /// False when the page was cropped before the end of the search window
    pub whole_search_window_used: bool,

    /// Search window to use for the next search in seconds
    pub next_search_window_secs: i64,

    /// Token for the next page
    pub next_page_cursor: Option<String>,

    /// Token for the previous page
    pub previous_page_cursor: Option<String>,
}

/// Query for decoding a cursor token.
#[derive(Debug, Deserialize)]
pub struct DecodeCursorRequest {
    /// Encoded cursor
    pub token: String,
}

/// A decoded page cursor.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct CursorResult {
    /// Page direction
    pub page_type: PageType,

    /// Sort order
    pub sort_order: SortOrder,

    /// Earliest departure time
    pub earliest_departure_time: Option<DateTime<Utc>>,

    /// Latest arrival time
    pub latest_arrival_time: Option<DateTime<Utc>>,

    /// Search window in seconds
    pub search_window_secs: i64,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl ItineraryResult {
    /// Create from validated itinerary bounds.
    pub fn from_bounds(bounds: &ItineraryBounds) -> Self {
        Self {
            start_time: bounds.start_time(),
            end_time: bounds.end_time(),
        }
    }
}

impl PlanPageResponse {
    /// Create from a page plan and the itineraries kept on the page.
    pub fn from_plan(
        plan: &PagePlan,
        sort_order: SortOrder,
        kept: &[ItineraryBounds],
        removed_itineraries: usize,
    ) -> Result<Self, CursorError> {
        Ok(Self {
            sort_order,
            itineraries: kept.iter().map(ItineraryResult::from_bounds).collect(),
            removed_itineraries,
            search_window_used_secs: plan.search_window_used.num_seconds(),
            whole_search_window_used: plan.whole_search_window_used,
            next_search_window_secs: plan.next_search_window.num_seconds(),
            next_page_cursor: plan.next_page.map(|c| c.encode()).transpose()?,
            previous_page_cursor: plan.previous_page.map(|c| c.encode()).transpose()?,
        })
    }
}

impl CursorResult {
    /// Create from a decoded cursor.
    pub fn from_cursor(cursor: &PageCursor) -> Self {
        Self {
            page_type: cursor.page_type(),
            sort_order: cursor.sort_order(),
            earliest_departure_time: cursor.earliest_departure_time(),
            latest_arrival_time: cursor.latest_arrival_time(),
            search_window_secs: cursor.search_window().num_seconds(),
        }
    }
}
