//! Search-window adaptation.
//!
//! After a search completes we look at how many itineraries it found, and
//! whether the result had to be cropped, to pick the search window for the
//! next independent search. Low-frequency areas get a wider window so the
//! client doesn't need to page through many empty windows; dense results get
//! a narrower one.

use chrono::{DateTime, Duration, Utc};

use crate::domain::MAX_SEARCH_WINDOW_SECS;

/// Minutes added to the search window when a search returned few
/// itineraries, indexed by the number of itineraries found.
///
/// ```text
///  0: 6h    4: 30m
///  1: 4h    5: 20m
///  2: 2h    6: 10m
///  3: 1h
/// ```
const EXTRA_TIME_MINS: [i64; 7] = [360, 240, 120, 60, 30, 20, 10];

/// Smallest window ever suggested (minutes).
const MIN_SEARCH_WINDOW_MINS: i64 = 10;

/// Windows up to this size are rounded to 10 minutes, larger ones to 30.
const FINE_ROUNDING_LIMIT_MINS: i64 = 4 * 60;

/// Largest window ever suggested (minutes).
const MAX_SEARCH_WINDOW_MINS: i64 = MAX_SEARCH_WINDOW_SECS / 60;

/// Calculate the search window to use for the next search.
///
/// If `latest_departure_time` is set, the result was reduced by the
/// max-itineraries limit and only the span from `earliest_departure_time`
/// to `latest_departure_time` was actually used. 7/8 of the unused part is
/// removed, leaving some slack so the next result is likely to fill up the
/// itinerary limit as well.
///
/// Otherwise the window grows when fewer than seven itineraries were found
/// (six hours extra for none, down to ten minutes for six), and is returned
/// unchanged when seven or more were found.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use paging_server::paging::calculate_new_search_window;
///
/// let edt = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
///
/// // Cropped at 90 of 120 minutes: 120 - 7 * 30 / 8 minutes, rounded up to 100
/// let sw = calculate_new_search_window(
///     Duration::minutes(120),
///     edt,
///     Some(edt + Duration::minutes(90)),
///     5,
/// );
/// assert_eq!(sw, Duration::minutes(100));
///
/// // Nothing found: add six hours, rounded up to 30 minutes
/// let sw = calculate_new_search_window(Duration::minutes(40), edt, None, 0);
/// assert_eq!(sw, Duration::minutes(420));
/// ```
pub fn calculate_new_search_window(
    used_search_window: Duration,
    earliest_departure_time: DateTime<Utc>,
    latest_departure_time: Option<DateTime<Utc>>,
    itinerary_count: usize,
) -> Duration {
    if let Some(latest_departure_time) = latest_departure_time {
        let used_secs = used_search_window.num_seconds();
        let actual_secs = latest_departure_time
            .signed_duration_since(earliest_departure_time)
            .num_seconds();
        let unused_secs = used_secs - actual_secs;

        let new_secs = used_secs - 7 * unused_secs / 8;

        // Round down to whole minutes before normalizing
        return normalize_search_window(new_secs / 60);
    }

    match EXTRA_TIME_MINS.get(itinerary_count) {
        Some(extra) => normalize_search_window(used_search_window.num_minutes() + extra),
        None => used_search_window,
    }
}

/// Round a search window (in minutes) up to a tidy value:
///
/// - below 10 minutes it becomes 10 minutes;
/// - up to 4 hours it is rounded up to the closest 10 minutes;
/// - up to 24 hours it is rounded up to the closest 30 minutes;
/// - above 24 hours it is capped at one day.
pub fn normalize_search_window(minutes: i64) -> Duration {
    if minutes < MIN_SEARCH_WINDOW_MINS {
        Duration::minutes(MIN_SEARCH_WINDOW_MINS)
    } else if minutes <= FINE_ROUNDING_LIMIT_MINS {
        Duration::minutes(ceiling(minutes, 10))
    } else if minutes <= MAX_SEARCH_WINDOW_MINS {
        Duration::minutes(ceiling(minutes, 30))
    } else {
        Duration::minutes(MAX_SEARCH_WINDOW_MINS)
    }
}

/// Round `value` up to the closest multiple of `step`.
///
/// Negative values truncate toward zero instead; normalization never passes
/// one, since anything below the minimum window is clamped first.
fn ceiling(value: i64, step: i64) -> i64 {
    if value < 0 {
        (value / step) * step
    } else {
        ((value + step - 1) / step) * step
    }
}
