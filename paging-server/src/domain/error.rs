//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from token decoding and HTTP errors.

use chrono::{DateTime, Utc};

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A time window must cover a positive span
    #[error("search window must be positive, got {0} seconds")]
    EmptyWindow(i64),

    /// Search windows are capped at one day
    #[error("search window must be at most one day, got {0} seconds")]
    WindowTooLong(i64),

    /// Instant too close to the limits of the representable range
    #[error("time {0} is outside the supported range")]
    OutOfRange(DateTime<Utc>),

    /// Itinerary ends before it starts
    #[error("itinerary ends before it starts")]
    InvertedItinerary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::EmptyWindow(0);
        assert_eq!(err.to_string(), "search window must be positive, got 0 seconds");

        let err = DomainError::WindowTooLong(90_000);
        assert_eq!(
            err.to_string(),
            "search window must be at most one day, got 90000 seconds"
        );

        let err = DomainError::InvertedItinerary;
        assert_eq!(err.to_string(), "itinerary ends before it starts");
    }
}
