//! Domain types for itinerary paging.
//!
//! These types describe the time bounds of a search and of the itineraries
//! it returned. Types enforce their invariants at construction time, so code
//! that receives them can trust their validity.

mod error;
mod itinerary;
mod order;
mod time;

pub use error::DomainError;
pub use itinerary::{HasTimeBounds, ItineraryBounds};
pub use order::{PageType, SortOrder};
pub use time::{MAX_SEARCH_WINDOW_SECS, TimeWindow, ceil_to_minute, floor_to_minute};
pub(crate) use time::ensure_pageable;
