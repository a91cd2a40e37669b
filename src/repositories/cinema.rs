//! Cinema repository, including the application-level cascade that removes a
//! cinema's theatres, layouts, and sessions in one ordered transaction.

use crate::error::AppError;
use crate::models::cinema::Cinema;
use crate::repositories::transaction::{begin_transaction, commit_transaction};
use crate::types::CinemaId;
use sqlx::PgPool;

const TABLE_NAME: &str = "cinema";
const SELECT_COLUMNS: &str = "id, name, address";

#[derive(Debug, Default, Clone, Copy)]
pub struct CinemaRepository;

impl CinemaRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn find_all(&self, db: &PgPool) -> Result<Vec<Cinema>, AppError> {
        let query = format!("SELECT {} FROM {} ORDER BY name", SELECT_COLUMNS, TABLE_NAME);
        let rows = sqlx::query_as::<_, Cinema>(&query).fetch_all(db).await?;
        Ok(rows)
    }

    pub async fn find_by_id(&self, db: &PgPool, id: CinemaId) -> Result<Cinema, AppError> {
        let query = format!("SELECT {} FROM {} WHERE id = $1", SELECT_COLUMNS, TABLE_NAME);
        let row = sqlx::query_as::<_, Cinema>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Cinema not found".to_string()))?;
        Ok(row)
    }

    /// Duplicate names surface as Conflict via the unique constraint.
    pub async fn create(&self, db: &PgPool, name: &str, address: &str) -> Result<Cinema, AppError> {
        let query = format!(
            "INSERT INTO {} (name, address) VALUES ($1, $2) RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, Cinema>(&query)
            .bind(name)
            .bind(address)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    pub async fn update(
        &self,
        db: &PgPool,
        id: CinemaId,
        name: &str,
        address: &str,
    ) -> Result<Cinema, AppError> {
        let query = format!(
            "UPDATE {} SET name = $2, address = $3 WHERE id = $1 RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, Cinema>(&query)
            .bind(id)
            .bind(name)
            .bind(address)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Cinema not found".to_string()))?;
        Ok(row)
    }

    /// Removes a cinema and everything hanging off it. The cascade is
    /// expressed here rather than in the schema so the ordering and rollback
    /// semantics stay visible and testable.
    pub async fn delete_cascade(&self, db: &PgPool, id: CinemaId) -> Result<bool, AppError> {
        let mut tx = begin_transaction(db).await?;

        sqlx::query(
            "DELETE FROM seat_structure WHERE theatre_id IN \
             (SELECT id FROM theatre WHERE cinema_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "DELETE FROM session WHERE theatre_id IN \
             (SELECT id FROM theatre WHERE cinema_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM theatre WHERE cinema_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM cinema WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        commit_transaction(tx).await?;
        Ok(deleted.rows_affected() > 0)
    }
}
