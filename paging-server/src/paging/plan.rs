//! Paging for one search response.
//!
//! Combines the search-window calculation with the cursor factory: given
//! what a completed search used and returned, produce the window for the
//! next search and the two page cursors.

use chrono::{DateTime, Duration, Utc};

use super::crop::CroppingInfo;
use super::cursor::PageCursor;
use super::factory::PageCursorFactory;
use super::window::calculate_new_search_window;
use crate::domain::{PageType, SortOrder, TimeWindow};

/// What a completed search used and returned.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Sort order of the result.
    pub sort_order: SortOrder,

    /// Page type of the request, or `None` for an original search.
    pub page_type: Option<PageType>,

    /// Departure window actually searched.
    pub window: TimeWindow,

    /// Latest arrival time constraint, if any.
    pub latest_arrival_time: Option<DateTime<Utc>>,

    /// Number of itineraries in the result.
    pub itinerary_count: usize,

    /// Set when the result was cropped by the max-itineraries limit.
    pub cropping: Option<CroppingInfo>,
}

/// Window and cursors to return with a search response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    pub search_window_used: Duration,
    /// False when the result was cropped before the end of the window.
    pub whole_search_window_used: bool,
    pub next_search_window: Duration,
    pub previous_page: Option<PageCursor>,
    pub next_page: Option<PageCursor>,
}

/// Compute the adapted search window and the page cursors for `outcome`.
///
/// When the result was cropped, the removed itinerary's departure is the
/// latest departure time actually covered by the result.
pub fn plan_page(outcome: &SearchOutcome) -> PagePlan {
    let edt = outcome.window.start();
    let search_window_used = outcome.window.duration();

    let next_search_window = calculate_new_search_window(
        search_window_used,
        edt,
        outcome.cropping.map(|c| c.start_time),
        outcome.itinerary_count,
    );

    let mut factory = PageCursorFactory::new(outcome.sort_order, next_search_window)
        .with_original_search(
            outcome.page_type,
            edt,
            outcome.latest_arrival_time,
            search_window_used,
        );
    if let Some(cropping) = outcome.cropping {
        factory = factory.with_removed_itineraries(cropping.start_time, cropping.end_time);
    }

    PagePlan {
        search_window_used,
        whole_search_window_used: factory.whole_search_window_used(),
        next_search_window,
        previous_page: factory.previous_page_cursor(),
        next_page: factory.next_page_cursor(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, h, m, 0).unwrap()
    }

    fn outcome(itinerary_count: usize, cropping: Option<CroppingInfo>) -> SearchOutcome {
        SearchOutcome {
            sort_order: SortOrder::ArrivalAscending,
            page_type: None,
            window: TimeWindow::new(at(10, 0), Duration::minutes(120)).unwrap(),
            latest_arrival_time: None,
            itinerary_count,
            cropping,
        }
    }

    #[test]
    fn uncropped_search_widens_window() {
        let plan = plan_page(&outcome(3, None));

        assert_eq!(plan.search_window_used, Duration::minutes(120));
        assert!(plan.whole_search_window_used);
        assert_eq!(plan.next_search_window, Duration::minutes(180));

        let next = plan.next_page.unwrap();
        assert_eq!(next.earliest_departure_time(), Some(at(12, 0)));
        assert_eq!(next.search_window(), Duration::minutes(180));

        let prev = plan.previous_page.unwrap();
        assert_eq!(prev.earliest_departure_time(), Some(at(7, 0)));
    }

    #[test]
    fn cropped_search_shrinks_window_and_continues_at_removed() {
        let cropping = CroppingInfo {
            start_time: at(11, 30),
            end_time: at(12, 10),
        };
        let plan = plan_page(&outcome(5, Some(cropping)));

        // 120m used, 90m covered: shrinks to 100m
        assert!(!plan.whole_search_window_used);
        assert_eq!(plan.next_search_window, Duration::minutes(100));

        let next = plan.next_page.unwrap();
        assert_eq!(next.earliest_departure_time(), Some(at(11, 30)));
        assert_eq!(next.search_window(), Duration::minutes(100));

        let prev = plan.previous_page.unwrap();
        assert_eq!(prev.earliest_departure_time(), Some(at(8, 20)));
    }

    #[test]
    fn arrive_by_previous_page_keeps_latest_arrival() {
        let outcome = SearchOutcome {
            sort_order: SortOrder::DepartureDescending,
            page_type: None,
            window: TimeWindow::new(at(10, 0), Duration::minutes(60)).unwrap(),
            latest_arrival_time: Some(at(12, 0)),
            itinerary_count: 8,
            cropping: None,
        };
        let plan = plan_page(&outcome);

        assert_eq!(plan.next_search_window, Duration::minutes(60));
        let prev = plan.previous_page.unwrap();
        assert_eq!(prev.earliest_departure_time(), Some(at(9, 0)));
        assert_eq!(prev.latest_arrival_time(), Some(at(12, 0)));
    }
}
