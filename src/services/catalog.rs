//! Narrow read contract over the catalog, as consumed by the scheduling
//! engine. Kept behind a trait so scheduling logic is testable without a
//! store.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use sqlx::PgPool;

use crate::error::AppError;
use crate::types::{MovieId, TheatreId};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Total runtime in minutes for the movie; NotFound when no such movie.
    async fn run_time_minutes(&self, movie_id: MovieId) -> Result<i32, AppError>;

    /// Whether the theatre exists at all.
    async fn theatre_exists(&self, theatre_id: TheatreId) -> Result<bool, AppError>;
}

/// Catalog façade backed by the relational store.
#[derive(Clone)]
pub struct PgMovieCatalog {
    pool: PgPool,
}

impl PgMovieCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovieCatalog for PgMovieCatalog {
    async fn run_time_minutes(&self, movie_id: MovieId) -> Result<i32, AppError> {
        let run_time = sqlx::query_scalar::<_, i32>("SELECT run_time_mins FROM movie WHERE id = $1")
            .bind(movie_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;
        Ok(run_time)
    }

    async fn theatre_exists(&self, theatre_id: TheatreId) -> Result<bool, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM theatre WHERE id = $1)")
                .bind(theatre_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}
