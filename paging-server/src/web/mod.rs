//! Web layer for the paging server.
//!
//! Provides HTTP endpoints for computing page cursors and decoding them.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
