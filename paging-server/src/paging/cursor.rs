//! Page cursors and their opaque token form.
//!
//! A cursor holds everything needed to fetch the next or previous page of
//! the same logical search. Clients never look inside; they receive an
//! encoded token and send it back as-is.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{MAX_SEARCH_WINDOW_SECS, PageType, SortOrder};

/// Error encoding or decoding a page cursor token.
#[derive(Debug, thiserror::Error)]
pub enum CursorError {
    /// Cursor could not be serialized
    #[error("failed to encode page cursor: {0}")]
    Encode(#[source] serde_json::Error),

    /// Token is empty or whitespace
    #[error("page cursor is empty")]
    Empty,

    /// Token is not valid URL-safe base64
    #[error("page cursor is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decoded token is not a cursor
    #[error("page cursor is malformed: {0}")]
    Json(#[from] serde_json::Error),

    /// Cursor carries a search window that is not positive or exceeds one day
    #[error("page cursor has invalid search window: {0} seconds")]
    InvalidSearchWindow(i64),
}

/// Parameters for fetching one page of a paged itinerary search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    page_type: PageType,
    sort_order: SortOrder,
    earliest_departure_time: Option<DateTime<Utc>>,
    latest_arrival_time: Option<DateTime<Utc>>,
    search_window: Duration,
}

/// Serialized form of a cursor.
#[derive(Serialize, Deserialize)]
struct CursorToken {
    #[serde(rename = "type")]
    page_type: PageType,
    sort_order: SortOrder,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    edt: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lat: Option<DateTime<Utc>>,
    /// Search window in seconds
    sw: i64,
}

impl PageCursor {
    pub fn new(
        page_type: PageType,
        sort_order: SortOrder,
        earliest_departure_time: Option<DateTime<Utc>>,
        latest_arrival_time: Option<DateTime<Utc>>,
        search_window: Duration,
    ) -> Self {
        Self {
            page_type,
            sort_order,
            earliest_departure_time,
            latest_arrival_time,
            search_window,
        }
    }

    pub fn page_type(&self) -> PageType {
        self.page_type
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn earliest_departure_time(&self) -> Option<DateTime<Utc>> {
        self.earliest_departure_time
    }

    pub fn latest_arrival_time(&self) -> Option<DateTime<Utc>> {
        self.latest_arrival_time
    }

    pub fn search_window(&self) -> Duration {
        self.search_window
    }

    /// Encode the cursor as an opaque, URL-safe token.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{Duration, TimeZone, Utc};
    /// use paging_server::domain::{PageType, SortOrder};
    /// use paging_server::paging::PageCursor;
    ///
    /// let edt = Utc.with_ymd_and_hms(2024, 3, 15, 10, 40, 0).unwrap();
    /// let cursor = PageCursor::new(
    ///     PageType::Next,
    ///     SortOrder::ArrivalAscending,
    ///     Some(edt),
    ///     None,
    ///     Duration::minutes(40),
    /// );
    ///
    /// let token = cursor.encode().unwrap();
    /// assert_eq!(PageCursor::decode(&token).unwrap(), cursor);
    /// ```
    pub fn encode(&self) -> Result<String, CursorError> {
        let token = CursorToken {
            page_type: self.page_type,
            sort_order: self.sort_order,
            edt: self.earliest_departure_time,
            lat: self.latest_arrival_time,
            sw: self.search_window.num_seconds(),
        };
        let json = serde_json::to_vec(&token).map_err(CursorError::Encode)?;
        Ok(URL_SAFE_NO_PAD.encode(json))
    }

    /// Decode a token produced by [`PageCursor::encode`].
    pub fn decode(token: &str) -> Result<Self, CursorError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(CursorError::Empty);
        }

        let bytes = URL_SAFE_NO_PAD.decode(token)?;
        let decoded: CursorToken = serde_json::from_slice(&bytes)?;

        let search_window = Some(decoded.sw)
            .filter(|sw| (1..=MAX_SEARCH_WINDOW_SECS).contains(sw))
            .and_then(Duration::try_seconds)
            .ok_or(CursorError::InvalidSearchWindow(decoded.sw))?;

        Ok(Self {
            page_type: decoded.page_type,
            sort_order: decoded.sort_order,
            earliest_departure_time: decoded.edt,
            latest_arrival_time: decoded.lat,
            search_window,
        })
    }
}

impl fmt::Display for PageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PageCursor{{type: {}, sort: {}", self.page_type, self.sort_order)?;
        if let Some(edt) = self.earliest_departure_time {
            write!(f, ", edt: {}", edt.format("%Y-%m-%dT%H:%M:%SZ"))?;
        }
        if let Some(lat) = self.latest_arrival_time {
            write!(f, ", lat: {}", lat.format("%Y-%m-%dT%H:%M:%SZ"))?;
        }
        write!(f, ", sw: {}m}}", self.search_window.num_minutes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, h, m, 0).unwrap()
    }

    fn arrive_by_cursor() -> PageCursor {
        PageCursor::new(
            PageType::Previous,
            SortOrder::DepartureDescending,
            Some(at(9, 20)),
            Some(at(11, 0)),
            Duration::minutes(40),
        )
    }

    #[test]
    fn decode_restores_all_fields() {
        let cursor = arrive_by_cursor();
        let decoded = PageCursor::decode(&cursor.encode().unwrap()).unwrap();

        assert_eq!(decoded.page_type(), PageType::Previous);
        assert_eq!(decoded.sort_order(), SortOrder::DepartureDescending);
        assert_eq!(decoded.earliest_departure_time(), Some(at(9, 20)));
        assert_eq!(decoded.latest_arrival_time(), Some(at(11, 0)));
        assert_eq!(decoded.search_window(), Duration::minutes(40));
    }

    #[test]
    fn absent_bounds_are_left_out_of_token() {
        let cursor = PageCursor::new(
            PageType::Next,
            SortOrder::ArrivalAscending,
            None,
            None,
            Duration::minutes(10),
        );
        let json = URL_SAFE_NO_PAD.decode(cursor.encode().unwrap()).unwrap();
        let json = String::from_utf8(json).unwrap();

        assert_eq!(
            json,
            r#"{"type":"next","sort_order":"arrival_ascending","sw":600}"#
        );
        assert_eq!(PageCursor::decode(&cursor.encode().unwrap()).unwrap(), cursor);
    }

    #[test]
    fn token_is_url_safe() {
        let token = arrive_by_cursor().encode().unwrap();
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn decode_ignores_surrounding_whitespace() {
        let cursor = arrive_by_cursor();
        let token = format!("  {}\n", cursor.encode().unwrap());
        assert_eq!(PageCursor::decode(&token).unwrap(), cursor);
    }

    #[test]
    fn decode_rejects_empty_token() {
        assert!(matches!(PageCursor::decode(""), Err(CursorError::Empty)));
        assert!(matches!(PageCursor::decode("   "), Err(CursorError::Empty)));
    }

    #[test]
    fn decode_rejects_bad_base64() {
        assert!(matches!(
            PageCursor::decode("not base64!@#"),
            Err(CursorError::Base64(_))
        ));
    }

    #[test]
    fn decode_rejects_non_cursor_json() {
        let token = URL_SAFE_NO_PAD.encode(br#"{"hello":"world"}"#);
        assert!(matches!(
            PageCursor::decode(&token),
            Err(CursorError::Json(_))
        ));
    }

    #[test]
    fn decode_rejects_non_positive_window() {
        let token = URL_SAFE_NO_PAD.encode(br#"{"type":"next","sort_order":"arrival_ascending","sw":0}"#);
        assert!(matches!(
            PageCursor::decode(&token),
            Err(CursorError::InvalidSearchWindow(0))
        ));
    }

    fn token_with_window(sw: i64) -> String {
        let json = format!(r#"{{"type":"next","sort_order":"arrival_ascending","sw":{sw}}}"#);
        URL_SAFE_NO_PAD.encode(json)
    }

    #[test]
    fn decode_rejects_window_longer_than_a_day() {
        assert!(matches!(
            PageCursor::decode(&token_with_window(86_401)),
            Err(CursorError::InvalidSearchWindow(86_401))
        ));
        assert!(matches!(
            PageCursor::decode(&token_with_window(i64::MAX)),
            Err(CursorError::InvalidSearchWindow(i64::MAX))
        ));
        assert!(matches!(
            PageCursor::decode(&token_with_window(i64::MIN)),
            Err(CursorError::InvalidSearchWindow(i64::MIN))
        ));
    }

    #[test]
    fn decode_accepts_one_day_window() {
        let cursor = PageCursor::decode(&token_with_window(86_400)).unwrap();
        assert_eq!(cursor.search_window(), Duration::days(1));
    }

    #[test]
    fn display() {
        assert_eq!(
            arrive_by_cursor().to_string(),
            "PageCursor{type: previous, sort: departure-descending, \
             edt: 2024-03-15T09:20:00Z, lat: 2024-03-15T11:00:00Z, sw: 40m}"
        );
    }
}
