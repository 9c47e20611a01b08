//! Time bounds of itineraries returned by a search.

use chrono::{DateTime, Utc};

use super::{DomainError, ensure_pageable};

/// Anything with a departure and an arrival time.
///
/// Cropping only needs the time bounds of an itinerary, so it is generic
/// over this trait rather than over a concrete itinerary type.
pub trait HasTimeBounds {
    fn start_time(&self) -> DateTime<Utc>;
    fn end_time(&self) -> DateTime<Utc>;
}

/// Departure and arrival time of a single itinerary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItineraryBounds {
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
}

impl ItineraryBounds {
    /// Create itinerary bounds, rejecting an arrival before the departure.
    pub fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Result<Self, DomainError> {
        if end_time < start_time {
            return Err(DomainError::InvertedItinerary);
        }
        ensure_pageable(start_time)?;
        ensure_pageable(end_time)?;
        Ok(Self {
            start_time,
            end_time,
        })
    }
}

impl HasTimeBounds for ItineraryBounds {
    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }
}
