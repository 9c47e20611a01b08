//! Time handling for search windows.
//!
//! Search bounds are instants in UTC. Page cursors only ever carry
//! whole-minute bounds for removed itineraries, so this module provides the
//! minute rounding used when a result set is cropped.

use chrono::{DateTime, Duration, Timelike, Utc};
use std::fmt;

use super::DomainError;

/// Round an instant down to the start of its minute.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use paging_server::domain::floor_to_minute;
///
/// let t = Utc.with_ymd_and_hms(2024, 3, 15, 10, 23, 45).unwrap();
/// assert_eq!(floor_to_minute(t), Utc.with_ymd_and_hms(2024, 3, 15, 10, 23, 0).unwrap());
/// ```
pub fn floor_to_minute(t: DateTime<Utc>) -> DateTime<Utc> {
    t - Duration::seconds(i64::from(t.second())) - Duration::nanoseconds(i64::from(t.nanosecond()))
}

/// Round an instant up to the next whole minute.
///
/// Adds 59 seconds and then floors, so an instant already on a minute
/// boundary is unchanged.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use paging_server::domain::ceil_to_minute;
///
/// let t = Utc.with_ymd_and_hms(2024, 3, 15, 10, 23, 1).unwrap();
/// assert_eq!(ceil_to_minute(t), Utc.with_ymd_and_hms(2024, 3, 15, 10, 24, 0).unwrap());
///
/// let on_minute = Utc.with_ymd_and_hms(2024, 3, 15, 10, 23, 0).unwrap();
/// assert_eq!(ceil_to_minute(on_minute), on_minute);
/// ```
pub fn ceil_to_minute(t: DateTime<Utc>) -> DateTime<Utc> {
    floor_to_minute(t + Duration::seconds(59))
}

/// Largest search window accepted or suggested (seconds).
pub const MAX_SEARCH_WINDOW_SECS: i64 = 24 * 60 * 60;

/// The span of departure times a single search covers.
///
/// The window is half-open: `[start, end)`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    duration: Duration,
}

impl TimeWindow {
    /// Create a window starting at `start` and lasting `duration`.
    ///
    /// Returns an error unless `duration` is positive and at most one day,
    /// and the window can be paged a day either way without leaving the
    /// range chrono can represent.
    pub fn new(start: DateTime<Utc>, duration: Duration) -> Result<Self, DomainError> {
        if duration <= Duration::zero() {
            return Err(DomainError::EmptyWindow(duration.num_seconds()));
        }
        if duration.num_seconds() > MAX_SEARCH_WINDOW_SECS {
            return Err(DomainError::WindowTooLong(duration.num_seconds()));
        }
        ensure_pageable(start)?;
        ensure_pageable(start + duration)?;
        Ok(Self { start, duration })
    }

    /// Create a window from a length in whole seconds.
    pub fn from_secs(start: DateTime<Utc>, secs: i64) -> Result<Self, DomainError> {
        match Duration::try_seconds(secs) {
            Some(duration) => Self::new(start, duration),
            None if secs <= 0 => Err(DomainError::EmptyWindow(secs)),
            None => Err(DomainError::WindowTooLong(secs)),
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive end of the window.
    pub fn end(&self) -> DateTime<Utc> {
        self.start + self.duration
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

/// Check that `t` is far enough from the ends of the representable range
/// for cursor arithmetic around it, which moves at most two search windows
/// and a minute away.
pub(crate) fn ensure_pageable(t: DateTime<Utc>) -> Result<(), DomainError> {
    let margin = Duration::seconds(2 * MAX_SEARCH_WINDOW_SECS + 60);
    if t.checked_sub_signed(margin).is_none() || t.checked_add_signed(margin).is_none() {
        return Err(DomainError::OutOfRange(t));
    }
    Ok(())
}

impl fmt::Debug for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TimeWindow({} +{}m)",
            self.start.to_rfc3339(),
            self.duration.num_minutes()
        )
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format("%Y-%m-%dT%H:%M"),
            self.end().format("%Y-%m-%dT%H:%M")
        )
    }
}
