//! Creation of the previous/next page cursor pair for a search response.
//!
//! The factory is configured with the search that produced the current
//! page, and optionally with the bounds of the itineraries that were cropped
//! away by the max-itineraries limit. Both cursors are computed together on
//! first access and then reused.

use std::sync::OnceLock;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use super::cursor::PageCursor;
use crate::domain::{PageType, SortOrder, ceil_to_minute, floor_to_minute};

/// Bounds of the search that produced the current page.
#[derive(Debug, Clone, Copy)]
struct CurrentSearch {
    page_type: PageType,
    edt: DateTime<Utc>,
    lat: Option<DateTime<Utc>>,
    search_window: Duration,
}

/// Bounds of the first itinerary removed from the current page, rounded
/// outwards to whole minutes.
#[derive(Debug, Clone, Copy)]
struct RemovedItinerary {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

/// Working pair of search bounds for one of the two cursors.
#[derive(Debug, Default)]
struct SearchTime {
    edt: Option<DateTime<Utc>>,
    lat: Option<DateTime<Utc>>,
}

/// Builds the previous and next page cursors for one search response.
///
/// One factory is created per response; it is not reused across requests.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use paging_server::domain::SortOrder;
/// use paging_server::paging::PageCursorFactory;
///
/// let edt = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
/// let factory = PageCursorFactory::new(SortOrder::ArrivalAscending, Duration::minutes(50))
///     .with_original_search(None, edt, None, Duration::minutes(40));
///
/// let next = factory.next_page_cursor().unwrap();
/// assert_eq!(next.earliest_departure_time(), Some(edt + Duration::minutes(40)));
/// assert_eq!(next.search_window(), Duration::minutes(50));
/// ```
#[derive(Debug)]
pub struct PageCursorFactory {
    sort_order: SortOrder,
    new_search_window: Duration,
    current: Option<CurrentSearch>,
    removed: Option<RemovedItinerary>,
    cursors: OnceLock<(PageCursor, PageCursor)>,
}

impl PageCursorFactory {
    /// Create a factory for a response sorted by `sort_order`.
    ///
    /// `new_search_window` is the adapted window; both cursors carry it.
    pub fn new(sort_order: SortOrder, new_search_window: Duration) -> Self {
        Self {
            sort_order,
            new_search_window,
            current: None,
            removed: None,
            cursors: OnceLock::new(),
        }
    }

    /// Set the earliest-departure-time, optional latest-arrival-time and
    /// search window of the search that produced the current page.
    ///
    /// A missing `page_type` means this is the original search, not a page;
    /// it is treated as the page type matching the sort order.
    pub fn with_original_search(
        mut self,
        page_type: Option<PageType>,
        edt: DateTime<Utc>,
        lat: Option<DateTime<Utc>>,
        search_window: Duration,
    ) -> Self {
        self.current = Some(CurrentSearch {
            page_type: page_type.unwrap_or_else(|| PageType::from_sort_order(self.sort_order)),
            edt,
            lat,
            search_window,
        });
        self.cursors = OnceLock::new();
        self
    }

    /// Record that the result was cropped, with the departure and arrival
    /// time of the removed itinerary.
    ///
    /// `start_time` is rounded down and `end_time` up to the closest minute.
    ///
    /// Only the FIRST removed itinerary is used. That can miss itineraries on
    /// the following page: when cropping from the end of the sort order the
    /// start should be the earliest departure of all removed itineraries, and
    /// when cropping from the start it should be the latest. The end time
    /// should be replaced by removing duplicates between the two pages, for
    /// example by carrying a hash per itinerary in the token.
    pub fn with_removed_itineraries(
        mut self,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        self.removed = Some(RemovedItinerary {
            start: floor_to_minute(start_time),
            end: ceil_to_minute(end_time),
        });
        self.cursors = OnceLock::new();
        self
    }

    /// Whether the whole search window was used, i.e. nothing was cropped.
    pub fn whole_search_window_used(&self) -> bool {
        self.removed.is_none()
    }

    /// Cursor for the page before the current one, if paging is possible.
    pub fn previous_page_cursor(&self) -> Option<PageCursor> {
        self.page_cursors().map(|(prev, _)| prev)
    }

    /// Cursor for the page after the current one, if paging is possible.
    pub fn next_page_cursor(&self) -> Option<PageCursor> {
        self.page_cursors().map(|(_, next)| next)
    }

    fn page_cursors(&self) -> Option<(PageCursor, PageCursor)> {
        let current = self.current?;
        Some(*self.cursors.get_or_init(|| self.create_page_cursors(&current)))
    }

    /// Create the (previous, next) cursor pair.
    fn create_page_cursors(&self, current: &CurrentSearch) -> (PageCursor, PageCursor) {
        let mut prev = SearchTime::default();
        let mut next = SearchTime::default();

        match (self.sort_order, current.page_type) {
            // Depart after, sorted on arrival time with the earliest first
            (SortOrder::ArrivalAscending, PageType::Next) => {
                prev.edt = Some(current.edt - self.new_search_window);
                next.edt = Some(match self.removed {
                    None => current.edt + current.search_window,
                    Some(removed) => removed.start,
                });
            }
            (SortOrder::ArrivalAscending, PageType::Previous) => {
                match self.removed {
                    None => {
                        prev.edt = Some(current.edt - current.search_window);
                    }
                    Some(removed) => {
                        // TODO: use the latest start time of all removed itineraries
                        prev.edt = Some(start_of_search_window(removed.start, current));
                        prev.lat = Some(removed.end);
                    }
                }
                next.edt = Some(current.edt + current.search_window);
            }
            // Arrive by, sorted on departure time with the latest first
            (SortOrder::DepartureDescending, PageType::Previous) => {
                match self.removed {
                    None => {
                        prev.edt = Some(current.edt - self.new_search_window);
                        prev.lat = current.lat;
                    }
                    Some(removed) => {
                        prev.edt = Some(start_of_search_window(removed.start, current));
                        // TODO: replace by filtering out itineraries already returned
                        prev.lat = Some(removed.end);
                    }
                }
                next.edt = Some(current.edt + current.search_window);
            }
            (SortOrder::DepartureDescending, PageType::Next) => {
                prev.edt = Some(current.edt - self.new_search_window);
                prev.lat = current.lat;
                next.edt = Some(match self.removed {
                    None => current.edt + current.search_window,
                    Some(removed) => removed.start,
                });
            }
        }

        let prev_cursor = PageCursor::new(
            PageType::Previous,
            self.sort_order,
            prev.edt,
            prev.lat,
            self.new_search_window,
        );
        let next_cursor = PageCursor::new(
            PageType::Next,
            self.sort_order,
            next.edt,
            next.lat,
            self.new_search_window,
        );

        debug!(
            sort_order = %self.sort_order,
            page_type = %current.page_type,
            cropped = self.removed.is_some(),
            prev = %prev_cursor,
            next = %next_cursor,
            "created page cursors"
        );

        (prev_cursor, next_cursor)
    }
}

/// Start of a search window given the last minute included in it.
///
/// The window is `[start, end)`, so one extra minute is added back before
/// subtracting the window length.
fn start_of_search_window(
    last_minute_in_window: DateTime<Utc>,
    current: &CurrentSearch,
) -> DateTime<Utc> {
    last_minute_in_window - current.search_window + Duration::seconds(60)
}
