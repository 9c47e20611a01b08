//! Itinerary paging server.
//!
//! Given the outcome of a transit itinerary search, answers: "what search
//! window should the next search use, and how does the client fetch the
//! previous and next page of this result?"

pub mod domain;
pub mod paging;
pub mod web;
