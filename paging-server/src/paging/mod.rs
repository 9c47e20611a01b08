//! Search-window adaptation and page cursors.
//!
//! This module decides how a paged itinerary search continues:
//!
//! - [`calculate_new_search_window`] widens or narrows the search window for
//!   the next search based on how dense the current result was;
//! - [`PageCursorFactory`] produces the previous/next page cursors for a
//!   response, taking cropping by the max-itineraries limit into account;
//! - [`crop_itineraries`] applies that limit and reports what was removed.

mod config;
mod crop;
mod cursor;
mod factory;
mod plan;
mod window;

pub use config::{ConfigError, MAX_ITINERARIES_ENV, PagingConfig, SEARCH_WINDOW_ENV};
pub use crop::{CroppingInfo, Cropped, compare, crop_itineraries};
pub use cursor::{CursorError, PageCursor};
pub use factory::PageCursorFactory;
pub use plan::{PagePlan, SearchOutcome, plan_page};
pub use window::{calculate_new_search_window, normalize_search_window};
