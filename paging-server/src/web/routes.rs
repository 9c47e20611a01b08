//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{debug, error, warn};

use crate::domain::{DomainError, ItineraryBounds, SortOrder, TimeWindow};
use crate::paging::{CursorError, PageCursor, SearchOutcome, crop_itineraries, plan_page};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/paging/plan", post(plan_paging))
        .route("/paging/cursor", get(decode_cursor))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Crop the itineraries of a completed search and compute its page cursors.
async fn plan_paging(
    State(state): State<AppState>,
    Json(req): Json<PlanPageRequest>,
) -> Result<Json<PlanPageResponse>, AppError> {
    // A page request continues the sort order and direction of its cursor
    let (sort_order, page_type, cursor_window) = match req.page_cursor.as_deref() {
        Some(token) => {
            let cursor = PageCursor::decode(token)?;
            (
                cursor.sort_order(),
                Some(cursor.page_type()),
                Some(cursor.search_window()),
            )
        }
        None => (SortOrder::from_arrive_by(req.arrive_by), None, None),
    };

    let edt = req.earliest_departure_time;
    let window = match (req.search_window_secs, cursor_window) {
        (Some(secs), _) => TimeWindow::from_secs(edt, secs)?,
        (None, Some(search_window)) => TimeWindow::new(edt, search_window)?,
        (None, None) => TimeWindow::new(edt, state.config.search_window())?,
    };

    let itineraries = req
        .itineraries
        .iter()
        .map(|it| ItineraryBounds::new(it.start_time, it.end_time))
        .collect::<Result<Vec<_>, _>>()?;

    let max = req.num_itineraries.unwrap_or(state.config.max_itineraries);
    let cropped = crop_itineraries(itineraries, sort_order, max);

    let outcome = SearchOutcome {
        sort_order,
        page_type,
        window,
        latest_arrival_time: req.latest_arrival_time,
        itinerary_count: cropped.kept.len(),
        cropping: cropped.removed,
    };
    let plan = plan_page(&outcome);

    debug!(
        window = %window,
        kept = cropped.kept.len(),
        removed = cropped.removed_count,
        next_search_window_mins = plan.next_search_window.num_minutes(),
        "planned page"
    );

    Ok(Json(PlanPageResponse::from_plan(
        &plan,
        sort_order,
        &cropped.kept,
        cropped.removed_count,
    )?))
}

/// Decode a cursor token, for debugging clients.
async fn decode_cursor(
    Query(req): Query<DecodeCursorRequest>,
) -> Result<Json<CursorResult>, AppError> {
    let cursor = PageCursor::decode(&req.token)?;
    Ok(Json(CursorResult::from_cursor(&cursor)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<CursorError> for AppError {
    fn from(e: CursorError) -> Self {
        match e {
            CursorError::Encode(_) => AppError::Internal {
                message: e.to_string(),
            },
            _ => AppError::BadRequest {
                message: e.to_string(),
            },
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => {
                warn!(status = %StatusCode::BAD_REQUEST, "{message}");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Internal { message } => {
                error!(status = %StatusCode::INTERNAL_SERVER_ERROR, "{message}");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
