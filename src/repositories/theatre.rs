//! Theatre repository.
//!
//! Create/update run inside a caller-supplied transaction so the theatre row
//! and its seat layout commit or roll back as one unit.

use crate::error::AppError;
use crate::models::theatre::{Theatre, TheatreType};
use crate::types::{CinemaId, TheatreId};
use sqlx::postgres::PgTransaction;
use sqlx::PgPool;

const TABLE_NAME: &str = "theatre";
const SELECT_COLUMNS: &str = "id, theatre_number, theatre_type, cinema_id";

fn update_statement() -> String {
    format!(
        "UPDATE {} SET theatre_number = $2, theatre_type = $3, cinema_id = $4 \
         WHERE id = $1 RETURNING {}",
        TABLE_NAME, SELECT_COLUMNS
    )
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TheatreRepository;

impl TheatreRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn find_by_id(&self, db: &PgPool, id: TheatreId) -> Result<Theatre, AppError> {
        let query = format!("SELECT {} FROM {} WHERE id = $1", SELECT_COLUMNS, TABLE_NAME);
        let row = sqlx::query_as::<_, Theatre>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Theatre not found".to_string()))?;
        Ok(row)
    }

    pub async fn list_by_cinema(
        &self,
        db: &PgPool,
        cinema_id: CinemaId,
    ) -> Result<Vec<Theatre>, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE cinema_id = $1 ORDER BY theatre_number",
            SELECT_COLUMNS, TABLE_NAME
        );
        let rows = sqlx::query_as::<_, Theatre>(&query)
            .bind(cinema_id)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    /// Duplicate (number, cinema) pairs surface as Conflict via the unique
    /// constraint.
    pub async fn create_in_tx(
        &self,
        tx: &mut PgTransaction<'_>,
        number: i32,
        theatre_type: TheatreType,
        cinema_id: CinemaId,
    ) -> Result<Theatre, AppError> {
        let query = format!(
            "INSERT INTO {} (theatre_number, theatre_type, cinema_id) \
             VALUES ($1, $2, $3) RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, Theatre>(&query)
            .bind(number)
            .bind(theatre_type)
            .bind(cinema_id)
            .fetch_one(&mut **tx)
            .await?;
        Ok(row)
    }

    /// The supplied cinema is applied too, so an update can move a theatre
    /// between cinemas; the (number, cinema) unique pair still holds.
    pub async fn update_in_tx(
        &self,
        tx: &mut PgTransaction<'_>,
        id: TheatreId,
        number: i32,
        theatre_type: TheatreType,
        cinema_id: CinemaId,
    ) -> Result<Theatre, AppError> {
        let row = sqlx::query_as::<_, Theatre>(&update_statement())
            .bind(id)
            .bind(number)
            .bind(theatre_type)
            .bind(cinema_id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Theatre not found".to_string()))?;
        Ok(row)
    }

    pub async fn delete_in_tx(
        &self,
        tx: &mut PgTransaction<'_>,
        id: TheatreId,
    ) -> Result<bool, AppError> {
        let query = format!("DELETE FROM {} WHERE id = $1", TABLE_NAME);
        let result = sqlx::query(&query).bind(id).execute(&mut **tx).await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_applies_every_payload_field_including_the_cinema() {
        let sql = update_statement();
        assert!(sql.contains("theatre_number = $2"), "{sql}");
        assert!(sql.contains("theatre_type = $3"), "{sql}");
        assert!(sql.contains("cinema_id = $4"), "{sql}");
    }
}
