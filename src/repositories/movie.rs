//! Movie repository.
//!
//! Saving a movie and its cast is one transactional unit: the movie row, any
//! new actor rows, and the junction entries commit together or not at all.
//! Deleting a movie cascades its sessions in application code so the
//! ordering and rollback semantics stay explicit.

use crate::error::AppError;
use crate::models::actor::CastMember;
use crate::models::movie::{Movie, MoviePayload};
use crate::repositories::actor::ActorRepository;
use crate::repositories::common::push_clause;
use crate::repositories::transaction::{begin_transaction, commit_transaction};
use crate::types::{ActorId, MovieId};
use crate::utils::pagination::{offset_for_page, MOVIES_PER_PAGE};
use chrono::NaiveDateTime;
use sqlx::postgres::PgTransaction;
use sqlx::{PgPool, QueryBuilder};

const TABLE_NAME: &str = "movie";
const SELECT_COLUMNS: &str =
    "id, title, run_time_mins, summary, release_date, rating, director, cover_art_url";

#[derive(Debug, Default, Clone, Copy)]
pub struct MovieRepository;

impl MovieRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn find_by_id(&self, db: &PgPool, id: MovieId) -> Result<Movie, AppError> {
        let query = format!("SELECT {} FROM {} WHERE id = $1", SELECT_COLUMNS, TABLE_NAME);
        let row = sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;
        Ok(row)
    }

    pub async fn select_all(
        &self,
        db: &PgPool,
        search: Option<&str>,
        page: Option<u32>,
    ) -> Result<Vec<Movie>, AppError> {
        let mut builder = QueryBuilder::new(format!("SELECT {} FROM {}", SELECT_COLUMNS, TABLE_NAME));
        let mut has_clause = false;
        if let Some(term) = search {
            push_clause(&mut builder, &mut has_clause);
            builder.push("title ILIKE ").push_bind(format!("%{}%", term));
        }
        builder.push(" ORDER BY id");
        if let Some(page) = page {
            builder
                .push(" LIMIT ")
                .push_bind(MOVIES_PER_PAGE as i64)
                .push(" OFFSET ")
                .push_bind(offset_for_page(page));
        }

        let rows = builder.build_query_as::<Movie>().fetch_all(db).await?;
        Ok(rows)
    }

    pub async fn count_all(&self, db: &PgPool) -> Result<i64, AppError> {
        let query = format!("SELECT COUNT(*) FROM {}", TABLE_NAME);
        let count = sqlx::query_scalar::<_, i64>(&query).fetch_one(db).await?;
        Ok(count)
    }

    /// Movies already released at `reference` that still have a session
    /// scheduled at or after it.
    pub async fn select_with_upcoming_sessions(
        &self,
        db: &PgPool,
        reference: NaiveDateTime,
        page: Option<u32>,
    ) -> Result<Vec<Movie>, AppError> {
        let mut builder = QueryBuilder::new(format!(
            "SELECT {} FROM {} WHERE release_date <= ",
            SELECT_COLUMNS, TABLE_NAME
        ));
        builder
            .push_bind(reference.date())
            .push(
                " AND EXISTS (SELECT 1 FROM session \
                 WHERE session.movie_id = movie.id AND session.session_time >= ",
            )
            .push_bind(reference)
            .push(") ORDER BY id");
        if let Some(page) = page {
            builder
                .push(" LIMIT ")
                .push_bind(MOVIES_PER_PAGE as i64)
                .push(" OFFSET ")
                .push_bind(offset_for_page(page));
        }

        let rows = builder.build_query_as::<Movie>().fetch_all(db).await?;
        Ok(rows)
    }

    pub async fn count_with_upcoming_sessions(
        &self,
        db: &PgPool,
        reference: NaiveDateTime,
    ) -> Result<i64, AppError> {
        let query = format!(
            "SELECT COUNT(*) FROM {} WHERE release_date <= $1 AND EXISTS \
             (SELECT 1 FROM session WHERE session.movie_id = movie.id \
              AND session.session_time >= $2)",
            TABLE_NAME
        );
        let count = sqlx::query_scalar::<_, i64>(&query)
            .bind(reference.date())
            .bind(reference)
            .fetch_one(db)
            .await?;
        Ok(count)
    }

    pub async fn select_by_actor(
        &self,
        db: &PgPool,
        actor_id: ActorId,
    ) -> Result<Vec<Movie>, AppError> {
        let query = format!(
            "SELECT {} FROM {} \
             JOIN movie_actor ON movie_actor.movie_id = movie.id \
             WHERE movie_actor.actor_id = $1 ORDER BY movie.id",
            "movie.id, title, run_time_mins, summary, release_date, rating, director, cover_art_url",
            TABLE_NAME
        );
        let rows = sqlx::query_as::<_, Movie>(&query)
            .bind(actor_id)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    /// Cast of a movie in billing order.
    pub async fn cast_of(&self, db: &PgPool, movie_id: MovieId) -> Result<Vec<CastMember>, AppError> {
        let rows = sqlx::query_as::<_, CastMember>(
            "SELECT actor.id, actor.name, movie_actor.cast_priority \
             FROM actor JOIN movie_actor ON movie_actor.actor_id = actor.id \
             WHERE movie_actor.movie_id = $1 ORDER BY movie_actor.cast_priority",
        )
        .bind(movie_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Inserts the movie and its cast as one unit. A duplicate title rolls
    /// the whole save back and surfaces as Conflict.
    pub async fn create_with_cast(&self, db: &PgPool, payload: &MoviePayload) -> Result<Movie, AppError> {
        let mut tx = begin_transaction(db).await?;

        let query = format!(
            "INSERT INTO {} (title, run_time_mins, summary, release_date, rating, director, cover_art_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let movie = sqlx::query_as::<_, Movie>(&query)
            .bind(&payload.title)
            .bind(payload.run_time_mins)
            .bind(&payload.summary)
            .bind(payload.release_date)
            .bind(payload.rating)
            .bind(&payload.director)
            .bind(&payload.cover_art_url)
            .fetch_one(&mut *tx)
            .await?;

        self.replace_cast_in_tx(&mut tx, movie.id, payload).await?;

        commit_transaction(tx).await?;
        Ok(movie)
    }

    pub async fn update_with_cast(
        &self,
        db: &PgPool,
        id: MovieId,
        payload: &MoviePayload,
    ) -> Result<Movie, AppError> {
        let mut tx = begin_transaction(db).await?;

        let query = format!(
            "UPDATE {} SET title = $2, run_time_mins = $3, summary = $4, release_date = $5, \
             rating = $6, director = $7, cover_art_url = $8 WHERE id = $1 RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let movie = sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .bind(&payload.title)
            .bind(payload.run_time_mins)
            .bind(&payload.summary)
            .bind(payload.release_date)
            .bind(payload.rating)
            .bind(&payload.director)
            .bind(&payload.cover_art_url)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;

        sqlx::query("DELETE FROM movie_actor WHERE movie_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        self.replace_cast_in_tx(&mut tx, id, payload).await?;

        commit_transaction(tx).await?;
        Ok(movie)
    }

    async fn replace_cast_in_tx(
        &self,
        tx: &mut PgTransaction<'_>,
        movie_id: MovieId,
        payload: &MoviePayload,
    ) -> Result<(), AppError> {
        let actors = ActorRepository::new();
        for (priority, entry) in payload.cast.iter().enumerate() {
            let actor_id = match entry.id {
                Some(existing) => existing,
                None => actors.find_or_create_in_tx(tx, &entry.name).await?,
            };
            sqlx::query(
                "INSERT INTO movie_actor (movie_id, actor_id, cast_priority) VALUES ($1, $2, $3)",
            )
            .bind(movie_id)
            .bind(actor_id)
            .bind(priority as i32)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    /// Deletes the movie after cascading its sessions and cast links, all in
    /// one transaction.
    pub async fn delete_cascade(&self, db: &PgPool, id: MovieId) -> Result<bool, AppError> {
        let mut tx = begin_transaction(db).await?;

        sqlx::query("DELETE FROM session WHERE movie_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM movie_actor WHERE movie_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let deleted = sqlx::query("DELETE FROM movie WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        commit_transaction(tx).await?;
        Ok(deleted.rows_affected() > 0)
    }
}
