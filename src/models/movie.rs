//! Movie catalog records, ratings, and the payloads used to maintain them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::actor::CastMember;
use crate::types::MovieId;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// Total runtime in minutes; the scheduling engine's only input from here.
    pub run_time_mins: i32,
    pub summary: String,
    pub release_date: NaiveDate,
    pub rating: Rating,
    pub director: Option<String>,
    /// Opaque reference into the external image store.
    pub cover_art_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
/// Australian classification ratings.
pub enum Rating {
    G,
    PG,
    M,
    #[serde(rename = "MA15+")]
    #[sqlx(rename = "MA15+")]
    Ma15Plus,
    #[serde(rename = "R18+")]
    #[sqlx(rename = "R18+")]
    R18Plus,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
/// Payload for creating or updating a movie together with its cast.
pub struct MoviePayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(range(min = 1))]
    pub run_time_mins: i32,
    #[validate(length(min = 1))]
    pub summary: String,
    pub release_date: NaiveDate,
    pub rating: Rating,
    pub director: Option<String>,
    pub cover_art_url: Option<String>,
    /// Billing order: position in this list becomes the cast priority.
    #[serde(default)]
    pub cast: Vec<CastEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
/// One submitted cast member; an id means the actor already exists.
pub struct CastEntry {
    #[validate(length(min = 1))]
    pub name: String,
    pub id: Option<crate::types::ActorId>,
}

#[derive(Debug, Serialize)]
/// Movie annotated with its cast, sorted by billing priority.
pub struct MovieResponse {
    pub id: MovieId,
    pub title: String,
    pub run_time_mins: i32,
    pub summary: String,
    pub release_date: NaiveDate,
    pub rating: Rating,
    pub director: Option<String>,
    pub cover_art_url: Option<String>,
    pub cast: Vec<CastMember>,
}

impl MovieResponse {
    pub fn from_parts(movie: Movie, cast: Vec<CastMember>) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            run_time_mins: movie.run_time_mins,
            summary: movie.summary,
            release_date: movie.release_date,
            rating: movie.rating,
            director: movie.director,
            cover_art_url: movie.cover_art_url,
            cast,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_round_trips_through_wire_names() {
        assert_eq!(serde_json::to_string(&Rating::Ma15Plus).unwrap(), "\"MA15+\"");
        let parsed: Rating = serde_json::from_str("\"R18+\"").unwrap();
        assert_eq!(parsed, Rating::R18Plus);
        let parsed: Rating = serde_json::from_str("\"PG\"").unwrap();
        assert_eq!(parsed, Rating::PG);
    }

    #[test]
    fn unknown_rating_is_rejected() {
        let result: Result<Rating, _> = serde_json::from_str("\"NC-17\"");
        assert!(result.is_err());
    }

    #[test]
    fn payload_rejects_zero_runtime() {
        let payload = MoviePayload {
            title: "Short".to_string(),
            run_time_mins: 0,
            summary: "A film".to_string(),
            release_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            rating: Rating::G,
            director: None,
            cover_art_url: None,
            cast: vec![],
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("run_time_mins"));
    }
}
