//! Result ordering and paging direction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the itineraries of a search response are sorted.
///
/// A depart-after search sorts on arrival time with the earliest first. An
/// arrive-by search sorts on departure time with the latest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Depart-after: earliest arrival first
    ArrivalAscending,
    /// Arrive-by: latest departure first
    DepartureDescending,
}

impl SortOrder {
    /// The sort order used for a depart-after (`false`) or arrive-by
    /// (`true`) search.
    pub fn from_arrive_by(arrive_by: bool) -> Self {
        if arrive_by {
            SortOrder::DepartureDescending
        } else {
            SortOrder::ArrivalAscending
        }
    }

    pub fn is_sorted_by_arrival_time_ascending(&self) -> bool {
        matches!(self, SortOrder::ArrivalAscending)
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::ArrivalAscending => write!(f, "arrival-ascending"),
            SortOrder::DepartureDescending => write!(f, "departure-descending"),
        }
    }
}

/// Direction of a page relative to the page it was created from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageType {
    Next,
    Previous,
}

impl PageType {
    /// Page type of an original (not paged) search.
    ///
    /// The first search and a NEXT page are equivalent when creating new
    /// cursors for a depart-after search; for arrive-by the first search
    /// behaves like a PREVIOUS page.
    pub fn from_sort_order(sort_order: SortOrder) -> Self {
        if sort_order.is_sorted_by_arrival_time_ascending() {
            PageType::Next
        } else {
            PageType::Previous
        }
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageType::Next => write!(f, "next"),
            PageType::Previous => write!(f, "previous"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_order_from_arrive_by() {
        assert_eq!(SortOrder::from_arrive_by(false), SortOrder::ArrivalAscending);
        assert_eq!(SortOrder::from_arrive_by(true), SortOrder::DepartureDescending);
    }

    #[test]
    fn page_type_of_original_search() {
        assert_eq!(
            PageType::from_sort_order(SortOrder::ArrivalAscending),
            PageType::Next
        );
        assert_eq!(
            PageType::from_sort_order(SortOrder::DepartureDescending),
            PageType::Previous
        );
    }

    #[test]
    fn serde_names() {
        assert_eq!(
            serde_json::to_string(&SortOrder::DepartureDescending).unwrap(),
            "\"departure_descending\""
        );
        assert_eq!(
            serde_json::from_str::<PageType>("\"previous\"").unwrap(),
            PageType::Previous
        );
    }

    #[test]
    fn display() {
        assert_eq!(SortOrder::ArrivalAscending.to_string(), "arrival-ascending");
        assert_eq!(PageType::Next.to_string(), "next");
    }
}
