//! Cropping of a result set to the max-itineraries limit.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use tracing::trace;

use crate::domain::{HasTimeBounds, SortOrder};

/// Time bounds of the itinerary removed by the max-itineraries limit.
///
/// Only the first removed itinerary (in sort order) is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CroppingInfo {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Result of cropping: the kept itineraries and, if any were removed, the
/// bounds of the first removed one.
#[derive(Debug, Clone)]
pub struct Cropped<T> {
    pub kept: Vec<T>,
    pub removed: Option<CroppingInfo>,
    pub removed_count: usize,
}

/// Compare two itineraries by the given sort order.
///
/// Arrival ascending sorts on arrival time, then departure time. Departure
/// descending sorts on departure time latest first, then arrival time.
pub fn compare<T: HasTimeBounds>(sort_order: SortOrder, a: &T, b: &T) -> Ordering {
    match sort_order {
        SortOrder::ArrivalAscending => a
            .end_time()
            .cmp(&b.end_time())
            .then_with(|| a.start_time().cmp(&b.start_time())),
        SortOrder::DepartureDescending => b
            .start_time()
            .cmp(&a.start_time())
            .then_with(|| a.end_time().cmp(&b.end_time())),
    }
}

/// Sort `itineraries` by `sort_order` and keep at most `max` of them.
///
/// A `max` of zero means no limit.
pub fn crop_itineraries<T: HasTimeBounds>(
    mut itineraries: Vec<T>,
    sort_order: SortOrder,
    max: usize,
) -> Cropped<T> {
    itineraries.sort_by(|a, b| compare(sort_order, a, b));

    if max == 0 || itineraries.len() <= max {
        return Cropped {
            kept: itineraries,
            removed: None,
            removed_count: 0,
        };
    }

    let removed_items = itineraries.split_off(max);
    let removed = removed_items.first().map(|first| CroppingInfo {
        start_time: first.start_time(),
        end_time: first.end_time(),
    });

    trace!(
        kept = itineraries.len(),
        removed = removed_items.len(),
        "cropped itineraries to page size"
    );

    Cropped {
        kept: itineraries,
        removed,
        removed_count: removed_items.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItineraryBounds;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, h, m, 0).unwrap()
    }

    fn it(dep: (u32, u32), arr: (u32, u32)) -> ItineraryBounds {
        ItineraryBounds::new(at(dep.0, dep.1), at(arr.0, arr.1)).unwrap()
    }

    fn sample() -> Vec<ItineraryBounds> {
        vec![
            it((10, 20), (11, 0)),
            it((10, 0), (10, 50)),
            it((10, 30), (10, 55)),
            it((10, 5), (11, 0)),
        ]
    }

    #[test]
    fn arrival_ascending_order() {
        let result = crop_itineraries(sample(), SortOrder::ArrivalAscending, 0);
        assert_eq!(
            result.kept,
            vec![
                it((10, 0), (10, 50)),
                it((10, 30), (10, 55)),
                it((10, 5), (11, 0)),
                it((10, 20), (11, 0)),
            ]
        );
    }

    #[test]
    fn departure_descending_order() {
        let result = crop_itineraries(sample(), SortOrder::DepartureDescending, 0);
        assert_eq!(
            result.kept,
            vec![
                it((10, 30), (10, 55)),
                it((10, 20), (11, 0)),
                it((10, 5), (11, 0)),
                it((10, 0), (10, 50)),
            ]
        );
    }

    #[test]
    fn no_cropping_within_limit() {
        let result = crop_itineraries(sample(), SortOrder::ArrivalAscending, 4);
        assert_eq!(result.kept.len(), 4);
        assert_eq!(result.removed, None);
        assert_eq!(result.removed_count, 0);
    }

    #[test]
    fn zero_limit_keeps_everything() {
        let result = crop_itineraries(sample(), SortOrder::ArrivalAscending, 0);
        assert_eq!(result.kept.len(), 4);
        assert_eq!(result.removed, None);
    }

    #[test]
    fn reports_first_removed_itinerary() {
        let result = crop_itineraries(sample(), SortOrder::ArrivalAscending, 2);
        assert_eq!(result.kept.len(), 2);
        assert_eq!(result.removed_count, 2);
        assert_eq!(
            result.removed,
            Some(CroppingInfo {
                start_time: at(10, 5),
                end_time: at(11, 0),
            })
        );
    }

    #[test]
    fn reports_first_removed_for_arrive_by() {
        let result = crop_itineraries(sample(), SortOrder::DepartureDescending, 1);
        assert_eq!(result.kept, vec![it((10, 30), (10, 55))]);
        assert_eq!(
            result.removed,
            Some(CroppingInfo {
                start_time: at(10, 20),
                end_time: at(11, 0),
            })
        );
    }

    #[test]
    fn empty_input() {
        let result = crop_itineraries(Vec::<ItineraryBounds>::new(), SortOrder::ArrivalAscending, 3);
        assert!(result.kept.is_empty());
        assert_eq!(result.removed, None);
    }
}
