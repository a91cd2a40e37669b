//! Seat slot repository.
//!
//! A theatre's layout is only ever replaced wholesale: delete every slot for
//! the theatre, then insert the full new set, inside one transaction. No
//! mixed old/new state is observable to readers.

use crate::error::AppError;
use crate::models::seat::{NewSeatSlot, SeatSlot};
use crate::types::TheatreId;
use sqlx::postgres::PgTransaction;
use sqlx::PgPool;

const TABLE_NAME: &str = "seat_structure";
const SELECT_COLUMNS: &str = "id, theatre_id, seat_row, seat_column, seat_type, is_empty";

/// Count of a theatre's usable slots; gaps (`is_empty`) are excluded.
fn usable_count_statement() -> String {
    format!(
        "SELECT COUNT(*) FROM {} WHERE theatre_id = $1 AND is_empty = FALSE",
        TABLE_NAME
    )
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SeatRepository;

impl SeatRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list_by_theatre(
        &self,
        db: &PgPool,
        theatre_id: TheatreId,
    ) -> Result<Vec<SeatSlot>, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE theatre_id = $1",
            SELECT_COLUMNS, TABLE_NAME
        );
        let rows = sqlx::query_as::<_, SeatSlot>(&query)
            .bind(theatre_id)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    /// Usable seats only; structural gaps do not count. Recomputed from the
    /// stored rows on every call, never cached.
    pub async fn usable_seat_count(
        &self,
        db: &PgPool,
        theatre_id: TheatreId,
    ) -> Result<i64, AppError> {
        let query = usable_count_statement();
        let count = sqlx::query_scalar::<_, i64>(&query)
            .bind(theatre_id)
            .fetch_one(db)
            .await?;
        Ok(count)
    }

    /// Replaces the theatre's entire layout within the supplied transaction.
    pub async fn replace_layout_in_tx(
        &self,
        tx: &mut PgTransaction<'_>,
        theatre_id: TheatreId,
        slots: &[NewSeatSlot],
    ) -> Result<(), AppError> {
        self.delete_by_theatre_in_tx(tx, theatre_id).await?;

        let insert = format!(
            "INSERT INTO {} (theatre_id, seat_row, seat_column, seat_type, is_empty) \
             VALUES ($1, $2, $3, $4, $5)",
            TABLE_NAME
        );
        for slot in slots {
            let result = sqlx::query(&insert)
                .bind(theatre_id)
                .bind(&slot.seat_row)
                .bind(slot.seat_column)
                .bind(slot.seat_type)
                .bind(slot.is_empty)
                .execute(&mut **tx)
                .await?;
            if result.rows_affected() == 0 {
                return Err(AppError::InternalServerError(anyhow::anyhow!(
                    "Insert into seat table affected no rows"
                )));
            }
        }
        Ok(())
    }

    pub async fn delete_by_theatre_in_tx(
        &self,
        tx: &mut PgTransaction<'_>,
        theatre_id: TheatreId,
    ) -> Result<u64, AppError> {
        let query = format!("DELETE FROM {} WHERE theatre_id = $1", TABLE_NAME);
        let result = sqlx::query(&query).bind(theatre_id).execute(&mut **tx).await?;
        Ok(result.rows_affected())
    }
}
