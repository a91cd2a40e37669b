//! Session repository.
//!
//! Listing supports three timeline views relative to a reference instant:
//! past sessions strictly before it, future sessions strictly after it, and
//! present sessions on the same calendar day. When a date is supplied without
//! a timeline the listing defaults to the present view for that date.

use crate::error::AppError;
use crate::models::session::{Session, SessionPayload, Timeline};
use crate::repositories::common::push_clause;
use crate::types::{MovieId, SessionId, TheatreId};
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::postgres::PgTransaction;
use sqlx::{PgPool, Postgres, QueryBuilder};

const TABLE_NAME: &str = "session";
const SELECT_COLUMNS: &str = "id, theatre_id, movie_id, session_time, seats_sold";

/// Reference instant for the past and future views: an explicit date anchors
/// at that day's midnight, otherwise the current instant is used.
fn timeline_anchor(date: Option<NaiveDate>, now: NaiveDateTime) -> NaiveDateTime {
    date.and_then(|d| d.and_hms_opt(0, 0, 0)).unwrap_or(now)
}

/// Builds the listing query for the given filters. Past and future compare
/// strictly against the full anchor instant; present (and a bare date)
/// compare on calendar-date equality alone.
fn listing_query(filters: &SessionFilters, now: NaiveDateTime) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM {}", SELECT_COLUMNS, TABLE_NAME));
    let mut has_clause = false;

    if let Some(theatre_id) = filters.theatre_id {
        push_clause(&mut builder, &mut has_clause);
        builder.push("theatre_id = ").push_bind(theatre_id);
    }
    if let Some(movie_id) = filters.movie_id {
        push_clause(&mut builder, &mut has_clause);
        builder.push("movie_id = ").push_bind(movie_id);
    }

    let anchor = timeline_anchor(filters.date, now);
    match filters.timeline {
        Some(Timeline::Past) => {
            push_clause(&mut builder, &mut has_clause);
            builder.push("session_time < ").push_bind(anchor);
        }
        Some(Timeline::Future) => {
            push_clause(&mut builder, &mut has_clause);
            builder.push("session_time > ").push_bind(anchor);
        }
        Some(Timeline::Present) => {
            push_clause(&mut builder, &mut has_clause);
            builder
                .push("session_time::date = ")
                .push_bind(filters.date.unwrap_or_else(|| now.date()));
        }
        None => {
            if let Some(date) = filters.date {
                push_clause(&mut builder, &mut has_clause);
                builder.push("session_time::date = ").push_bind(date);
            }
        }
    }

    builder.push(" ORDER BY session_time");
    builder
}

#[derive(Debug, Default, Clone)]
pub struct SessionFilters {
    pub date: Option<NaiveDate>,
    pub theatre_id: Option<TheatreId>,
    pub movie_id: Option<MovieId>,
    pub timeline: Option<Timeline>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SessionRepository;

impl SessionRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn find_by_id(&self, db: &PgPool, id: SessionId) -> Result<Session, AppError> {
        let query = format!("SELECT {} FROM {} WHERE id = $1", SELECT_COLUMNS, TABLE_NAME);
        let row = sqlx::query_as::<_, Session>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;
        Ok(row)
    }

    /// Lists sessions for the given filters. `now` anchors the past and
    /// future views when no explicit date is supplied.
    pub async fn select_all(
        &self,
        db: &PgPool,
        filters: &SessionFilters,
        now: NaiveDateTime,
    ) -> Result<Vec<Session>, AppError> {
        let mut builder = listing_query(filters, now);
        let rows = builder.build_query_as::<Session>().fetch_all(db).await?;
        Ok(rows)
    }

    pub async fn select_by_theatre(
        &self,
        db: &PgPool,
        theatre_id: TheatreId,
        date: Option<NaiveDate>,
    ) -> Result<Vec<Session>, AppError> {
        let filters = SessionFilters {
            date,
            theatre_id: Some(theatre_id),
            ..SessionFilters::default()
        };
        // The anchor is unused without a timeline filter.
        let now = NaiveDateTime::default();
        self.select_all(db, &filters, now).await
    }

    pub async fn create(
        &self,
        db: &PgPool,
        payload: &SessionPayload,
        session_time: NaiveDateTime,
    ) -> Result<Session, AppError> {
        let query = format!(
            "INSERT INTO {} (theatre_id, movie_id, session_time, seats_sold) \
             VALUES ($1, $2, $3, 0) RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let session = sqlx::query_as::<_, Session>(&query)
            .bind(payload.theatre_id)
            .bind(payload.movie_id)
            .bind(session_time)
            .fetch_one(db)
            .await?;
        Ok(session)
    }

    pub async fn update(
        &self,
        db: &PgPool,
        id: SessionId,
        payload: &SessionPayload,
        session_time: NaiveDateTime,
    ) -> Result<Session, AppError> {
        let query = format!(
            "UPDATE {} SET theatre_id = $2, movie_id = $3, session_time = $4 \
             WHERE id = $1 RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let session = sqlx::query_as::<_, Session>(&query)
            .bind(id)
            .bind(payload.theatre_id)
            .bind(payload.movie_id)
            .bind(session_time)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;
        Ok(session)
    }

    pub async fn delete(&self, db: &PgPool, id: SessionId) -> Result<bool, AppError> {
        let query = format!("DELETE FROM {} WHERE id = $1", TABLE_NAME);
        let result = sqlx::query(&query).bind(id).execute(db).await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_by_theatre_in_tx(
        &self,
        tx: &mut PgTransaction<'_>,
        theatre_id: TheatreId,
    ) -> Result<u64, AppError> {
        let query = format!("DELETE FROM {} WHERE theatre_id = $1", TABLE_NAME);
        let result = sqlx::query(&query)
            .bind(theatre_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }
}
