//! Scheduled sessions and their wire payloads.
//!
//! A session's start is persisted as one combined instant; the end instant is
//! derived from the movie runtime on every read and never stored.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::movie::Movie;
use crate::models::theatre::Theatre;
use crate::types::{MovieId, SessionId, TheatreId};
use crate::validation::rules::validate_hhmm;

/// Wire format for session times-of-day.
pub const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub id: SessionId,
    pub theatre_id: TheatreId,
    pub movie_id: MovieId,
    /// Combined start instant; the single orderable value used for all
    /// comparisons and filtering.
    pub session_time: NaiveDateTime,
    pub seats_sold: i32,
}

impl Session {
    pub fn start_date(&self) -> NaiveDate {
        self.session_time.date()
    }

    pub fn start_time(&self) -> NaiveTime {
        self.session_time.time()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Time-window classification for session listings, relative to a reference
/// date.
pub enum Timeline {
    Past,
    Present,
    Future,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
/// Payload for scheduling or rescheduling a session.
pub struct SessionPayload {
    pub theatre_id: TheatreId,
    pub movie_id: MovieId,
    pub session_date: NaiveDate,
    /// 24-hour "HH:MM".
    #[validate(custom(function = "validate_hhmm"))]
    pub session_time: String,
}

impl SessionPayload {
    /// Combines the date and time fields into the persisted start instant.
    /// Callers validate the payload first, so the parse cannot fail here.
    pub fn start_instant(&self) -> Option<NaiveDateTime> {
        let time = NaiveTime::parse_from_str(&self.session_time, TIME_FORMAT).ok()?;
        Some(self.session_date.and_time(time))
    }
}

#[derive(Debug, Serialize)]
/// Session as returned by the create path: start fields only, no end time.
pub struct SessionCreatedResponse {
    pub id: SessionId,
    pub theatre_id: TheatreId,
    pub movie_id: MovieId,
    pub session_start_date: NaiveDate,
    pub session_start_time: String,
    pub seats_sold: i32,
}

impl From<Session> for SessionCreatedResponse {
    fn from(value: Session) -> Self {
        Self {
            id: value.id,
            theatre_id: value.theatre_id,
            movie_id: value.movie_id,
            session_start_date: value.start_date(),
            session_start_time: value.start_time().format(TIME_FORMAT).to_string(),
            seats_sold: value.seats_sold,
        }
    }
}

#[derive(Debug, Serialize)]
/// Session as returned by listings: start fields plus the freshly computed
/// end instant, optionally with embedded theatre/movie objects.
pub struct SessionResponse {
    pub id: SessionId,
    pub theatre_id: TheatreId,
    pub movie_id: MovieId,
    pub session_start_date: NaiveDate,
    pub session_start_time: String,
    pub session_end_date: NaiveDate,
    pub session_end_time: String,
    pub seats_sold: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theatre: Option<Theatre>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie: Option<Movie>,
}

impl SessionResponse {
    pub fn from_parts(session: Session, end: NaiveDateTime) -> Self {
        Self {
            id: session.id,
            theatre_id: session.theatre_id,
            movie_id: session.movie_id,
            session_start_date: session.start_date(),
            session_start_time: session.start_time().format(TIME_FORMAT).to_string(),
            session_end_date: end.date(),
            session_end_time: end.time().format(TIME_FORMAT).to_string(),
            seats_sold: session.seats_sold,
            theatre: None,
            movie: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_combines_date_and_time() {
        let payload = SessionPayload {
            theatre_id: TheatreId::new(1),
            movie_id: MovieId::new(2),
            session_date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            session_time: "19:45".to_string(),
        };
        assert!(payload.validate().is_ok());
        assert_eq!(
            payload.start_instant(),
            Some(
                NaiveDate::from_ymd_opt(2026, 3, 14)
                    .unwrap()
                    .and_hms_opt(19, 45, 0)
                    .unwrap()
            )
        );
    }

    #[test]
    fn payload_rejects_non_hhmm_times() {
        let payload = SessionPayload {
            theatre_id: TheatreId::new(1),
            movie_id: MovieId::new(2),
            session_date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            session_time: "7pm".to_string(),
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn timeline_parses_lowercase_values() {
        let timeline: Timeline = serde_json::from_str("\"past\"").unwrap();
        assert_eq!(timeline, Timeline::Past);
    }
}
